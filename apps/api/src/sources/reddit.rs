use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::sources::{ContentFetcher, Document, MAX_DOCUMENTS};

/// Listing size requested upstream; stickied and link-only posts are skipped locally.
const LISTING_LIMIT: usize = 25;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
    #[serde(default)]
    selftext: String,
    permalink: String,
    #[serde(default)]
    stickied: bool,
}

/// Reads top posts of the month from a subreddit's public JSON listing.
pub struct RedditFetcher {
    client: Client,
    base_url: String,
}

impl RedditFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent(concat!("reviewlens/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_listing(&self, topic: &str) -> Result<Vec<Document>> {
        let url = format!("{}/r/{}/top.json", self.base_url, topic);
        let limit = LISTING_LIMIT.to_string();
        info!("Fetching posts from r/{topic}");

        let response = self
            .client
            .get(&url)
            .query(&[("t", "month"), ("limit", limit.as_str())])
            .send()
            .await
            .context("Failed to fetch listing")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        let listing: Listing = response
            .json()
            .await
            .context("Failed to decode listing")?;

        Ok(select_documents(listing))
    }
}

#[async_trait]
impl ContentFetcher for RedditFetcher {
    async fn fetch(&self, topic: &str) -> Vec<Document> {
        match self.fetch_listing(topic).await {
            Ok(docs) => {
                info!("Fetched {} qualifying posts from r/{topic}", docs.len());
                docs
            }
            Err(e) => {
                warn!("Could not fetch r/{topic}: {e:#}");
                Vec::new()
            }
        }
    }
}

fn select_documents(listing: Listing) -> Vec<Document> {
    listing
        .data
        .children
        .into_iter()
        .map(|c| c.data)
        .filter(|p| !p.stickied && !p.selftext.trim().is_empty())
        .take(MAX_DOCUMENTS)
        .map(|p| {
            Document::new(
                p.title,
                p.selftext.trim(),
                format!("https://www.reddit.com{}", p.permalink),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::sources::MAX_BODY_CHARS;

    fn post(title: &str, body: &str, stickied: bool) -> Value {
        json!({
            "kind": "t3",
            "data": {
                "title": title,
                "selftext": body,
                "permalink": format!("/r/resumes/comments/{}/", title.to_lowercase()),
                "stickied": stickied
            }
        })
    }

    fn listing(children: Vec<Value>) -> Value {
        json!({"kind": "Listing", "data": {"children": children}})
    }

    #[tokio::test]
    async fn test_fetch_skips_stickied_and_empty_posts_and_caps_at_five() {
        let server = MockServer::start().await;
        let mut children = vec![
            post("Rules", "Read the rules", true),
            post("LinkOnly", "", false),
        ];
        for i in 0..8 {
            children.push(post(&format!("Post{i}"), "Quantify your impact.", false));
        }
        Mock::given(method("GET"))
            .and(path("/r/resumes/top.json"))
            .and(query_param("t", "month"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(children)))
            .mount(&server)
            .await;

        let docs = RedditFetcher::new(server.uri()).fetch("resumes").await;
        assert_eq!(docs.len(), MAX_DOCUMENTS);
        assert_eq!(docs[0].title, "Post0");
        assert_eq!(
            docs[0].url,
            "https://www.reddit.com/r/resumes/comments/post0/"
        );
    }

    #[tokio::test]
    async fn test_fetch_truncates_long_bodies() {
        let server = MockServer::start().await;
        let long = "x".repeat(5000);
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(listing(vec![post("Long", &long, false)])),
            )
            .mount(&server)
            .await;

        let docs = RedditFetcher::new(server.uri()).fetch("resumes").await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].body.len(), MAX_BODY_CHARS);
    }

    #[tokio::test]
    async fn test_upstream_error_yields_no_documents() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let docs = RedditFetcher::new(server.uri()).fetch("resumes").await;
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_listing_yields_no_documents() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
            .mount(&server)
            .await;

        let docs = RedditFetcher::new(server.uri()).fetch("resumes").await;
        assert!(docs.is_empty());
    }
}
