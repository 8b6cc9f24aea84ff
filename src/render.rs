//! Post rendering.
//!
//! Turns a list of [`PostRecord`]s into the nodes of a [`Container`].  This
//! is where every presentational fallback lives: derived provider names,
//! the "no image" placeholder, the unknown-date text and the empty state.
//!
//! Rendering is a full replace.  [`Container::render_posts`] discards the
//! previous nodes and builds the new ones from scratch, so calling it twice
//! with the same input yields the same container and nothing from an earlier
//! call survives a later one.
//!
//! All record text ends up in plain-text slots.  Nothing is interpreted as
//! markup, and control characters are neutralised so API data cannot emit
//! terminal escape sequences.

use reqwest::Url;

use crate::source::PostRecord;

pub const EMPTY_STATE_TEXT: &str = "No posts available yet.";
pub const NO_IMAGE_TEXT: &str = "No image";
pub const DEFAULT_IMAGE_ALT: &str = "Featured image";
pub const UNKNOWN_SOURCE: &str = "Unknown source";
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Contents of the `image-wrapper` slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSlot {
    /// The post has an image.
    Image {
        src: String,
        alt: String,
        /// Load only when scrolled into view.
        lazy: bool,
    },
    /// The post has no image; the slot shows `text` in its "no image" state.
    Placeholder { text: String },
}

/// Contents of the `post-link` slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLink {
    pub href: String,
    pub aria_label: String,
}

/// One instantiated post template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub image: ImageSlot,
    pub title: String,
    pub summary: String,
    pub link: PostLink,
    pub provider: String,
    pub release_date: String,
}

impl PostCard {
    /// Fill the card template from `post`, applying per-slot fallbacks.
    pub fn from_record(post: &PostRecord) -> Self {
        let title = plain_text(post.title.as_deref().unwrap_or_default());

        let image = match present(&post.image_url) {
            Some(src) => ImageSlot::Image {
                src: plain_text(src),
                alt: if title.is_empty() {
                    DEFAULT_IMAGE_ALT.to_string()
                } else {
                    title.clone()
                },
                lazy: true,
            },
            None => ImageSlot::Placeholder {
                text: NO_IMAGE_TEXT.to_string(),
            },
        };

        let aria_label = if title.is_empty() {
            "Open post".to_string()
        } else {
            format!("Open {title}")
        };

        Self {
            image,
            summary: plain_text(post.summary.as_deref().unwrap_or_default()),
            link: PostLink {
                href: plain_text(post.source_url.as_deref().unwrap_or_default()),
                aria_label,
            },
            provider: plain_text(&provider_name(post)),
            release_date: plain_text(present(&post.release_date).unwrap_or(UNKNOWN_DATE)),
            title,
        }
    }
}

/// A top-level child of the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Shown instead of any cards when there are no posts.
    EmptyState(String),
    Post(PostCard),
}

/// The element posts are rendered into.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Container {
    nodes: Vec<Node>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the container contents with `posts`.
    pub fn render_posts(&mut self, posts: &[PostRecord]) {
        self.nodes.clear();

        if posts.is_empty() {
            self.nodes.push(Node::EmptyState(EMPTY_STATE_TEXT.to_string()));
            return;
        }

        // Build every card before touching the container so it is updated
        // in one batch.
        let cards: Vec<Node> = posts
            .iter()
            .map(|post| Node::Post(PostCard::from_record(post)))
            .collect();
        self.nodes = cards;
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Rendered post cards, in display order.
    pub fn cards(&self) -> impl Iterator<Item = &PostCard> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Post(card) => Some(card),
            Node::EmptyState(_) => None,
        })
    }

    pub fn card_count(&self) -> usize {
        self.cards().count()
    }

    pub fn card(&self, index: usize) -> Option<&PostCard> {
        self.cards().nth(index)
    }
}

/// Display name of the post's origin.
///
/// The explicit `provider` wins; otherwise the host of `source_url`; otherwise
/// [`UNKNOWN_SOURCE`].
pub fn provider_name(post: &PostRecord) -> String {
    if let Some(provider) = present(&post.provider) {
        return provider.to_string();
    }

    post.source_url
        .as_deref()
        .and_then(|url| Url::parse(url).ok())
        .and_then(|url| url.host_str().filter(|h| !h.is_empty()).map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string())
}

/// `Some` only for a non-empty value.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Strip terminal control characters; line breaks and tabs become spaces.
fn plain_text(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
