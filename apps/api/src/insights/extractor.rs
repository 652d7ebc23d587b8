//! Insight Extractor: turns fetched community posts into InsightRecord candidates.
//!
//! Flow: documents → prompt → provider chain → decode → records.
//! No documents, no configured provider, or no usable payload all end in the
//! same static fallback list, so a caller always gets exactly ten records.

use serde::Deserialize;
use tracing::{info, warn};

use crate::insights::fallback::fallback_insights;
use crate::insights::prompts::{INSIGHT_MAX_TOKENS, INSIGHT_PROMPT_TEMPLATE, INSIGHT_SYSTEM};
use crate::llm_client::decode::decode_json;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{DecodeError, Origin, ProviderChain};
use crate::models::insight::{topic_url, InsightRecord, Sentiment};
use crate::sources::Document;

/// Records requested per topic.
pub const INSIGHTS_PER_TOPIC: usize = 10;

/// Unpersisted extraction output and where it came from.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<InsightRecord>,
    pub origin: Origin,
}

#[derive(Debug, Deserialize)]
struct ProviderInsight {
    insight: String,
    section: String,
    category: String,
    sentiment: Sentiment,
}

/// Models answer either with a bare array or with the array under "insights".
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InsightPayload {
    Bare(Vec<ProviderInsight>),
    Wrapped { insights: Vec<ProviderInsight> },
}

#[derive(Clone)]
pub struct InsightExtractor {
    providers: ProviderChain,
}

impl InsightExtractor {
    pub fn new(providers: ProviderChain) -> Self {
        Self { providers }
    }

    pub async fn extract(&self, topic: &str, documents: &[Document]) -> Extraction {
        if documents.is_empty() {
            info!("No documents for r/{topic}, using fallback insights");
            return fallback(topic);
        }

        let prompt = build_insight_prompt(topic, documents);
        let system = format!("{INSIGHT_SYSTEM} {JSON_ONLY_INSTRUCTION}");

        match self
            .providers
            .first_success(&prompt, &system, INSIGHT_MAX_TOKENS, |text| {
                decode_insights(text, topic)
            })
            .await
        {
            Some((records, provider)) => {
                info!(
                    "Extracted {} insights for r/{topic} via {}",
                    records.len(),
                    provider.name()
                );
                Extraction {
                    records,
                    origin: Origin::Provider(provider),
                }
            }
            None => {
                warn!("No provider produced insights for r/{topic}, using fallback insights");
                fallback(topic)
            }
        }
    }
}

fn fallback(topic: &str) -> Extraction {
    Extraction {
        records: fallback_insights(topic),
        origin: Origin::Fallback,
    }
}

/// Builds one prompt containing every document's title, body and url.
pub fn build_insight_prompt(topic: &str, documents: &[Document]) -> String {
    let documents_text = documents
        .iter()
        .enumerate()
        .map(|(i, d)| {
            format!(
                "POST {}\nTitle: {}\nURL: {}\nBody: {}\n",
                i + 1,
                d.title,
                d.url,
                d.body
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    INSIGHT_PROMPT_TEMPLATE
        .replace("{count}", &INSIGHTS_PER_TOPIC.to_string())
        .replace("{topic}", topic)
        .replace("{documents}", &documents_text)
}

/// Decodes model output into exactly `INSIGHTS_PER_TOPIC` records.
/// Extra items are dropped; too few is treated as an unusable payload.
pub fn decode_insights(text: &str, topic: &str) -> Result<Vec<InsightRecord>, DecodeError> {
    let items = match decode_json::<InsightPayload>(text)? {
        InsightPayload::Bare(items) => items,
        InsightPayload::Wrapped { insights } => insights,
    };

    if items.len() < INSIGHTS_PER_TOPIC {
        return Err(DecodeError::WrongCount {
            expected: INSIGHTS_PER_TOPIC,
            got: items.len(),
        });
    }

    let source_url = topic_url(topic);
    Ok(items
        .into_iter()
        .take(INSIGHTS_PER_TOPIC)
        .map(|i| InsightRecord {
            topic: topic.to_string(),
            insight: i.insight,
            section: i.section,
            category: i.category,
            sentiment: i.sentiment,
            source_url: source_url.clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::{json, Value};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ProviderConfig;
    use crate::llm_client::Provider;

    fn insight_array(n: usize) -> Value {
        Value::Array(
            (0..n)
                .map(|i| {
                    json!({
                        "insight": format!("Advice {i}"),
                        "section": "Skills",
                        "category": "ATS Optimization",
                        "sentiment": "positive"
                    })
                })
                .collect(),
        )
    }

    fn completion(content: &str) -> Value {
        json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
    }

    fn docs() -> Vec<Document> {
        vec![Document::new(
            "Got 5 interviews after this rewrite",
            "Numbers in every bullet.",
            "https://www.reddit.com/r/resumes/comments/abc/",
        )]
    }

    fn chain(primary: Option<&MockServer>, secondary: Option<&MockServer>) -> ProviderChain {
        let mut config = ProviderConfig {
            timeout: Duration::from_secs(5),
            ..ProviderConfig::unconfigured()
        };
        if let Some(server) = primary {
            config.primary_key = Some("pplx".to_string());
            config.primary_url = server.uri();
        }
        if let Some(server) = secondary {
            config.secondary_key = Some("gsk".to_string());
            config.secondary_url = server.uri();
        }
        ProviderChain::from_config(&config).with_max_attempts(1)
    }

    #[test]
    fn test_prompt_contains_every_document() {
        let prompt = build_insight_prompt("resumes", &docs());
        assert!(prompt.contains("r/resumes"));
        assert!(prompt.contains("Got 5 interviews after this rewrite"));
        assert!(prompt.contains("Numbers in every bullet."));
        assert!(prompt.contains("https://www.reddit.com/r/resumes/comments/abc/"));
        assert!(prompt.contains("exactly 10"));
    }

    #[test]
    fn test_decode_accepts_bare_and_wrapped_arrays() {
        let bare = insight_array(10).to_string();
        assert_eq!(decode_insights(&bare, "jobs").unwrap().len(), 10);

        let wrapped = json!({"insights": insight_array(12)}).to_string();
        let records = decode_insights(&wrapped, "jobs").unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].source_url, "https://reddit.com/r/jobs");
    }

    #[test]
    fn test_decode_rejects_short_lists_and_bad_sentiment() {
        let short = insight_array(3).to_string();
        assert!(matches!(
            decode_insights(&short, "jobs"),
            Err(DecodeError::WrongCount { expected: 10, got: 3 })
        ));

        let mut bad = insight_array(10);
        bad[0]["sentiment"] = json!("ecstatic");
        assert!(decode_insights(&bad.to_string(), "jobs").is_err());
    }

    #[tokio::test]
    async fn test_no_documents_skips_providers_and_returns_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let extractor = InsightExtractor::new(chain(Some(&server), None));
        let extraction = extractor.extract("resumes", &[]).await;
        assert_eq!(extraction.records.len(), 10);
        assert!(extraction.origin.is_mock());
    }

    #[tokio::test]
    async fn test_no_credentials_returns_fallback() {
        let extractor = InsightExtractor::new(ProviderChain::default());
        let extraction = extractor.extract("resumes", &docs()).await;
        assert_eq!(extraction.records, fallback_insights("resumes"));
        assert_eq!(extraction.origin, Origin::Fallback);
    }

    #[tokio::test]
    async fn test_failing_primary_falls_through_to_secondary() {
        let primary = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&primary)
            .await;
        let secondary = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion(&insight_array(10).to_string())),
            )
            .expect(1)
            .mount(&secondary)
            .await;

        let extractor = InsightExtractor::new(chain(Some(&primary), Some(&secondary)));
        let extraction = extractor.extract("resumes", &docs()).await;
        assert_eq!(extraction.origin, Origin::Provider(Provider::Groq));
        assert_eq!(extraction.records[0].insight, "Advice 0");
    }

    #[tokio::test]
    async fn test_malformed_output_everywhere_falls_back() {
        let primary = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("Here are ten insights:")),
            )
            .mount(&primary)
            .await;
        let secondary = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("{\"oops\": true}")))
            .mount(&secondary)
            .await;

        let extractor = InsightExtractor::new(chain(Some(&primary), Some(&secondary)));
        let extraction = extractor.extract("resumes", &docs()).await;
        assert!(extraction.origin.is_mock());
        assert_eq!(extraction.records.len(), 10);
    }
}
