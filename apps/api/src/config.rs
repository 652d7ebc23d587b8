use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PERPLEXITY_API_URL: &str = "https://api.perplexity.ai/chat/completions";
const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_REDDIT_BASE_URL: &str = "https://www.reddit.com";
const DEFAULT_TOPICS: &str = "resumes,jobs,careerguidance,recruitinghell,cscareerquestions";

/// Which generative providers are available and where they live.
/// Built once at startup; provider selection is a pure function of this struct.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Perplexity key. Tried first.
    pub primary_key: Option<String>,
    /// Groq key. Tried when the primary is absent or fails.
    pub secondary_key: Option<String>,
    pub primary_url: String,
    pub secondary_url: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    /// No credentials: every inference request goes straight to fallback content.
    pub fn unconfigured() -> Self {
        Self {
            primary_key: None,
            secondary_key: None,
            primary_url: DEFAULT_PERPLEXITY_API_URL.to_string(),
            secondary_url: DEFAULT_GROQ_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if DATABASE_URL is missing; provider keys are optional.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub providers: ProviderConfig,
    pub reddit_base_url: String,
    pub topics: Vec<String>,
    pub topic_interval: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .context("Required environment variable 'DATABASE_URL' is not set")?;

        let timeout_secs = parse_or(&lookup, "PROVIDER_TIMEOUT_SECS", 30u64)
            .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?;
        let interval_ms = parse_or(&lookup, "TOPIC_INTERVAL_MS", 1000u64)
            .context("TOPIC_INTERVAL_MS must be a whole number of milliseconds")?;

        let topics: Vec<String> = lookup("COLLECTION_TOPICS")
            .unwrap_or_else(|| DEFAULT_TOPICS.to_string())
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(Config {
            database_url,
            providers: ProviderConfig {
                primary_key: optional_key(&lookup, "PERPLEXITY_API_KEY"),
                secondary_key: optional_key(&lookup, "GROQ_API_KEY"),
                primary_url: lookup("PERPLEXITY_API_URL")
                    .unwrap_or_else(|| DEFAULT_PERPLEXITY_API_URL.to_string()),
                secondary_url: lookup("GROQ_API_URL")
                    .unwrap_or_else(|| DEFAULT_GROQ_API_URL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            reddit_base_url: lookup("REDDIT_BASE_URL")
                .unwrap_or_else(|| DEFAULT_REDDIT_BASE_URL.to_string()),
            topics,
            topic_interval: Duration::from_millis(interval_ms),
            port: parse_or(&lookup, "PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Empty strings count as absent, matching how the keys are usually provisioned.
fn optional_key<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => Ok(raw.trim().parse::<T>()?),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_database_url() {
        let config = Config::from_lookup(env(&[("DATABASE_URL", "postgres://localhost/db")])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.topic_interval, Duration::from_secs(1));
        assert_eq!(config.providers.timeout, Duration::from_secs(30));
        assert!(config.providers.primary_key.is_none());
        assert!(config.providers.secondary_key.is_none());
        assert_eq!(config.topics.len(), 5);
        assert_eq!(config.topics[0], "resumes");
    }

    #[test]
    fn test_missing_database_url_is_an_error() {
        assert!(Config::from_lookup(env(&[])).is_err());
    }

    #[test]
    fn test_empty_provider_keys_are_absent() {
        let config = Config::from_lookup(env(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("PERPLEXITY_API_KEY", ""),
            ("GROQ_API_KEY", "gsk-123"),
        ]))
        .unwrap();
        assert!(config.providers.primary_key.is_none());
        assert_eq!(config.providers.secondary_key.as_deref(), Some("gsk-123"));
    }

    #[test]
    fn test_topics_are_trimmed_and_blank_entries_dropped() {
        let config = Config::from_lookup(env(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("COLLECTION_TOPICS", " resumes , ,jobs"),
        ]))
        .unwrap();
        assert_eq!(config.topics, vec!["resumes".to_string(), "jobs".to_string()]);
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let result = Config::from_lookup(env(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("PORT", "eighty"),
        ]));
        assert!(result.is_err());
    }
}
