//! Post source abstraction layer.
//!
//! This module defines the [`PostSource`] trait, the [`PostRecord`] type and
//! the single fetch error taxonomy, [`FetchError`].  The concrete HTTP source
//! lives in [`http`].
//!
//! Sources report failures as `Err`; deciding that a failure means "no
//! posts" is done once, in [`fetch_posts`].
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `file.rs`).
//! 2. Define a struct and implement [`PostSource`] for it.
//! 3. Add `mod file;` below and re-export your struct in the `pub use` block.
//! 4. Construct an instance in `main.rs` and hand it to [`crate::poll::spawn`].

mod http;
mod post;

pub use http::HttpPostSource;
pub use post::PostRecord;

use thiserror::Error;
use tracing::warn;

/// Everything that can go wrong while fetching the post list.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or body-read failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API responded with {0}")]
    Status(u16),

    /// The body was not valid JSON.
    #[error("malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// The body was JSON but `items` was missing or not an array.
    #[error("response has no `items` array")]
    Envelope,
}

/// Trait that every post source must implement.
///
/// The poller calls [`fetch()`](PostSource::fetch) on a background thread,
/// so implementations must be [`Send`].
pub trait PostSource: Send {
    /// Human-readable label used in diagnostics.
    fn name(&self) -> &str;

    /// Fetch the current post list, in the order the source provides it.
    fn fetch(&self) -> Result<Vec<PostRecord>, FetchError>;
}

/// Fetch posts from `source`, treating any failure as an empty list.
///
/// The failure is logged and otherwise indistinguishable from a source that
/// has no posts.
pub fn fetch_posts(source: &dyn PostSource) -> Vec<PostRecord> {
    match source.fetch() {
        Ok(posts) => posts,
        Err(e) => {
            warn!(source = source.name(), error = %e, "unable to fetch posts");
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
