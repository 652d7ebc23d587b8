//! Storage seam for insights, resumes, feedback and scores.
//!
//! Production uses `PgStore`; tests use the in-memory store. Every write is an
//! independent append: no method updates or deletes existing rows.
//!
//! Feedback and score rows carry the id of the analysis run that produced
//! them, so one run can be read back without mixing in earlier ones.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::feedback::{FeedbackItem, ScoreSet};
use crate::models::insight::InsightRecord;
use crate::models::resume::Resume;

pub mod gateway;
#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use gateway::PersistenceGateway;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    async fn count_insights(&self) -> Result<i64>;

    /// Most recently stored insights first.
    async fn recent_insights(&self, limit: i64) -> Result<Vec<InsightRecord>>;

    async fn insert_insight(&self, record: &InsightRecord) -> Result<()>;

    async fn insert_feedback(&self, analysis_id: Uuid, item: &FeedbackItem) -> Result<()>;

    async fn insert_scores(&self, analysis_id: Uuid, scores: &ScoreSet) -> Result<()>;

    async fn insert_resume(&self, resume: &Resume) -> Result<()>;

    async fn get_resume(&self, id: &str) -> Result<Option<Resume>>;

    /// The newest score row for a resume and the run it belongs to.
    /// Re-analysis appends rather than overwrites.
    async fn latest_scores(&self, resume_id: &str) -> Result<Option<(Uuid, ScoreSet)>>;

    /// Feedback written by one analysis run, in insertion order.
    async fn feedback_for_analysis(&self, analysis_id: Uuid) -> Result<Vec<FeedbackItem>>;
}
