//! HTTP posts API source.
//!
//! Issues `GET {base}/api/posts` and decodes the `{ "items": [...] }`
//! envelope.  Envelope decoding is split out into [`parse_envelope`] so the
//! shape rules can be tested without a server.

use reqwest::blocking::Client;
use serde_json::Value;

use super::{FetchError, PostRecord, PostSource};

/// A post source backed by the posts REST API.
pub struct HttpPostSource {
    /// Full URL of the post list endpoint.
    pub endpoint: String,
    client: Client,
}

impl HttpPostSource {
    /// Create a source for `endpoint` (e.g.
    /// `http://localhost:8000/api/posts`) with a default HTTP client.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(endpoint, client))
    }

    /// Create a source that issues requests through `client`.
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }
}

/// Decode a response body into post records.
///
/// The body must be a JSON object whose `items` field is an array.  Array
/// elements are decoded leniently and kept in order.
pub fn parse_envelope(body: &[u8]) -> Result<Vec<PostRecord>, FetchError> {
    let envelope: Value = serde_json::from_slice(body)?;

    let items = match envelope {
        Value::Object(mut map) => map.remove("items"),
        _ => None,
    };

    match items {
        Some(items @ Value::Array(_)) => Ok(serde_json::from_value(items)?),
        _ => Err(FetchError::Envelope),
    }
}

impl PostSource for HttpPostSource {
    fn name(&self) -> &str {
        &self.endpoint
    }

    fn fetch(&self) -> Result<Vec<PostRecord>, FetchError> {
        let response = self.client.get(&self.endpoint).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes()?;
        parse_envelope(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
