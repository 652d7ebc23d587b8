//! Ordered provider fallback: primary first, then secondary.

use tracing::{info, warn};

use crate::config::ProviderConfig;
use crate::llm_client::{DecodeError, LlmClient, Provider};

/// Where a pipeline payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Provider(Provider),
    /// Static content substituted because no provider produced a usable payload.
    Fallback,
}

impl Origin {
    pub fn is_mock(&self) -> bool {
        matches!(self, Origin::Fallback)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Origin::Provider(p) => p.name(),
            Origin::Fallback => "fallback",
        }
    }
}

/// The configured providers in the order they are tried.
/// An absent credential simply leaves that provider out of the chain.
#[derive(Clone, Default)]
pub struct ProviderChain {
    clients: Vec<LlmClient>,
}

impl ProviderChain {
    pub fn from_config(config: &ProviderConfig) -> Self {
        let mut clients = Vec::new();
        if let Some(key) = &config.primary_key {
            clients.push(LlmClient::new(
                Provider::Perplexity,
                key.clone(),
                config.primary_url.clone(),
                config.timeout,
            ));
        }
        if let Some(key) = &config.secondary_key {
            clients.push(LlmClient::new(
                Provider::Groq,
                key.clone(),
                config.secondary_url.clone(),
                config.timeout,
            ));
        }
        Self { clients }
    }

    pub fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self {
            clients: self
                .clients
                .into_iter()
                .map(|c| c.with_max_attempts(max_attempts))
                .collect(),
        }
    }

    pub fn providers(&self) -> Vec<Provider> {
        self.clients.iter().map(LlmClient::provider).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Tries each provider in order and returns the first payload that decodes.
    /// Transport failures, non-2xx responses and decode errors all fall through
    /// to the next provider. `None` means every provider was absent or failed.
    pub async fn first_success<T>(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: u32,
        decode: impl Fn(&str) -> Result<T, DecodeError>,
    ) -> Option<(T, Provider)> {
        for client in &self.clients {
            let provider = client.provider();
            info!("Using {} for inference", provider.name());

            let text = match client.call_text(prompt, system, max_tokens).await {
                Ok(text) => text,
                Err(e) => {
                    warn!("{} call failed: {e}", provider.name());
                    continue;
                }
            };

            match decode(&text) {
                Ok(payload) => return Some((payload, provider)),
                Err(e) => {
                    warn!(
                        "{} returned an unusable payload: {e}; raw: {:?}",
                        provider.name(),
                        text.chars().take(200).collect::<String>()
                    );
                }
            }
        }
        None
    }
}
