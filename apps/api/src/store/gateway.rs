//! Persistence Gateway: best-effort append of pipeline output.
//!
//! Each row is inserted on its own. A failed insert is logged and skipped;
//! nothing is rolled back. Callers get the number of rows that made it.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::models::feedback::{FeedbackItem, ScoreSet};
use crate::models::insight::InsightRecord;
use crate::store::Store;

#[derive(Clone)]
pub struct PersistenceGateway {
    store: Arc<dyn Store>,
}

impl PersistenceGateway {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn store_insights(&self, topic: &str, records: &[InsightRecord]) -> usize {
        let mut stored = 0;
        for (i, record) in records.iter().enumerate() {
            match self.store.insert_insight(record).await {
                Ok(()) => stored += 1,
                Err(e) => warn!("Failed to insert insight {i} for r/{topic}: {e:#}"),
            }
        }
        info!("Stored {stored}/{} insights for r/{topic}", records.len());
        stored
    }

    pub async fn store_feedback(
        &self,
        resume_id: &str,
        analysis_id: Uuid,
        items: &[FeedbackItem],
    ) -> usize {
        let mut stored = 0;
        for (i, item) in items.iter().enumerate() {
            match self.store.insert_feedback(analysis_id, item).await {
                Ok(()) => stored += 1,
                Err(e) => warn!("Failed to insert feedback {i} for resume {resume_id}: {e:#}"),
            }
        }
        info!(
            "Stored {stored}/{} feedback items for resume {resume_id}",
            items.len()
        );
        stored
    }

    /// Returns 1 when the score row was written, 0 otherwise.
    pub async fn store_scores(&self, resume_id: &str, analysis_id: Uuid, scores: &ScoreSet) -> usize {
        match self.store.insert_scores(analysis_id, scores).await {
            Ok(()) => 1,
            Err(e) => {
                warn!("Failed to insert scores for resume {resume_id}: {e:#}");
                0
            }
        }
    }
}
