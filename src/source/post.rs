//! The post record delivered by the posts API.
//!
//! `PostRecord` is what the fetcher hands to the renderer.  The API does not
//! promise any particular shape for the elements of `items`, so decoding is
//! lenient: every field is optional and a field of the wrong type is treated
//! as missing rather than rejecting the record.
//!
//! ## For contributors
//!
//! The renderer owns all fallback logic (provider derivation, placeholder
//! text).  Keep this type a faithful copy of what the API sent; do not fill
//! in defaults here.

use serde::Deserialize;
use serde_json::Value;

/// A single post, as received from `GET /api/posts`.
///
/// Decoded from any JSON value via [`From<Value>`]:
///
/// * strings are taken verbatim;
/// * numbers and booleans become their textual form;
/// * `null`, arrays, objects and missing keys become `None`;
/// * a non-object element yields a record with every field `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct PostRecord {
    /// Headline shown in the `post-title` slot.
    pub title: Option<String>,

    /// Body text shown in the `post-summary` slot.
    pub summary: Option<String>,

    /// Absolute URL of the original post.
    ///
    /// Used as the link target and, when `provider` is missing, as the
    /// source of the derived provider name.
    pub source_url: Option<String>,

    /// Optional cover image.
    pub image_url: Option<String>,

    /// Explicit provider display name.
    pub provider: Option<String>,

    /// Free-form release date, displayed as-is.
    pub release_date: Option<String>,
}

impl From<Value> for PostRecord {
    fn from(value: Value) -> Self {
        let field = |key: &str| value.get(key).and_then(display_text);

        Self {
            title: field("title"),
            summary: field("summary"),
            source_url: field("source_url"),
            image_url: field("image_url"),
            provider: field("provider"),
            release_date: field("release_date"),
        }
    }
}

/// Text form of a scalar JSON value; `None` for null and containers.
fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
