//! Token-bucket pacing for upstream calls, one permit per interval.

use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

/// Spaces out topic collection so the shared content source and providers are
/// not hammered. The first permit is immediate; each later one waits for the
/// bucket to refill. A zero interval disables pacing.
pub struct TopicPacer {
    limiter: Option<DefaultDirectRateLimiter>,
}

impl TopicPacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            limiter: Quota::with_period(interval).map(RateLimiter::direct),
        }
    }

    pub async fn ready(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}
