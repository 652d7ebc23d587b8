use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An uploaded resume and its extracted text. Read-only to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resume {
    pub id: String,
    pub filename: String,
    pub content: String,
    pub upload_date: DateTime<Utc>,
}
