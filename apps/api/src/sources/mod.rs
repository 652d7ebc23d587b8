//! Community content sources feeding the insight pipeline.

use async_trait::async_trait;
use serde::Serialize;

pub mod reddit;

pub use reddit::RedditFetcher;

/// Most documents returned for one topic.
pub const MAX_DOCUMENTS: usize = 5;
/// Body characters kept per document for prompting.
pub const MAX_BODY_CHARS: usize = 1000;

/// A single community post, body already truncated for prompting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub body: String,
    pub url: String,
}

impl Document {
    pub fn new(title: impl Into<String>, body: &str, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: truncate_chars(body, MAX_BODY_CHARS),
            url: url.into(),
        }
    }
}

/// Fetches documents for a topic. Never fails: an unreachable source or an
/// empty listing comes back as an empty vec, which callers must handle.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, topic: &str) -> Vec<Document>;
}

/// Source that never has documents. Used for the synthetic topic and when
/// collection should run on fallback content only.
pub struct NoContent;

#[async_trait]
impl ContentFetcher for NoContent {
    async fn fetch(&self, _topic: &str) -> Vec<Document> {
        Vec::new()
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_body_is_truncated_by_characters() {
        let body = "é".repeat(1500);
        let doc = Document::new("t", &body, "u");
        assert_eq!(doc.body.chars().count(), MAX_BODY_CHARS);
    }

    #[test]
    fn test_short_body_is_kept_whole() {
        let doc = Document::new("t", "short", "u");
        assert_eq!(doc.body, "short");
    }
}
