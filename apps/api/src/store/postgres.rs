use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::feedback::{FeedbackItem, ScoreSet, DEFAULT_SEVERITY};
use crate::models::insight::{InsightRecord, Sentiment};
use crate::models::resume::Resume;
use crate::store::Store;

#[derive(Debug, FromRow)]
struct InsightRow {
    subreddit: String,
    insight: String,
    section: String,
    category: String,
    sentiment: String,
    source_url: String,
}

impl From<InsightRow> for InsightRecord {
    fn from(row: InsightRow) -> Self {
        InsightRecord {
            topic: row.subreddit,
            insight: row.insight,
            section: row.section,
            category: row.category,
            sentiment: row.sentiment.parse().unwrap_or(Sentiment::Neutral),
            source_url: row.source_url,
        }
    }
}

#[derive(Debug, FromRow)]
struct FeedbackRow {
    resume_id: String,
    #[sqlx(rename = "type")]
    kind: String,
    title: String,
    category: String,
    section: String,
    feedback: String,
    severity: Option<String>,
    suggestion: Option<String>,
    source: Option<String>,
}

/// The `type` column is CHECK-constrained; an unknown value is a hard error.
impl TryFrom<FeedbackRow> for FeedbackItem {
    type Error = anyhow::Error;

    fn try_from(row: FeedbackRow) -> Result<Self> {
        Ok(FeedbackItem {
            kind: row.kind.parse().map_err(|e| anyhow!("resume_feedback row: {e}"))?,
            resume_id: row.resume_id,
            title: row.title,
            category: row.category,
            section: row.section,
            description: row.feedback,
            severity: row.severity.unwrap_or_else(|| DEFAULT_SEVERITY.to_string()),
            suggestion: row.suggestion,
            source: row.source,
        })
    }
}

#[derive(Debug, FromRow)]
struct ScoreRow {
    analysis_id: Uuid,
    resume_id: String,
    overall_score: f64,
    content_score: f64,
    formatting_score: f64,
    impact_score: f64,
    ats_score: f64,
}

impl From<ScoreRow> for (Uuid, ScoreSet) {
    fn from(row: ScoreRow) -> Self {
        (
            row.analysis_id,
            ScoreSet {
                resume_id: row.resume_id,
                overall: row.overall_score,
                content: row.content_score,
                formatting: row.formatting_score,
                impact: row.impact_score,
                ats: row.ats_score,
            },
        )
    }
}

/// Postgres-backed store. Table layout lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn count_insights(&self) -> Result<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM reddit_insights")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn recent_insights(&self, limit: i64) -> Result<Vec<InsightRecord>> {
        let rows = sqlx::query_as::<_, InsightRow>(
            r#"
            SELECT subreddit, insight, section, category, sentiment, source_url
            FROM reddit_insights
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(InsightRecord::from).collect())
    }

    async fn insert_insight(&self, record: &InsightRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reddit_insights
                (subreddit, insight, section, category, sentiment, source_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&record.topic)
        .bind(&record.insight)
        .bind(&record.section)
        .bind(&record.category)
        .bind(record.sentiment.as_str())
        .bind(&record.source_url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_feedback(&self, analysis_id: Uuid, item: &FeedbackItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO resume_feedback
                (analysis_id, resume_id, type, title, category, section, feedback, severity, suggestion, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(analysis_id)
        .bind(&item.resume_id)
        .bind(item.kind.as_str())
        .bind(&item.title)
        .bind(&item.category)
        .bind(&item.section)
        .bind(&item.description)
        .bind(&item.severity)
        .bind(&item.suggestion)
        .bind(&item.source)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_scores(&self, analysis_id: Uuid, scores: &ScoreSet) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO resume_scores
                (analysis_id, resume_id, overall_score, content_score, formatting_score, impact_score, ats_score)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(analysis_id)
        .bind(&scores.resume_id)
        .bind(scores.overall)
        .bind(scores.content)
        .bind(scores.formatting)
        .bind(scores.impact)
        .bind(scores.ats)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_resume(&self, resume: &Resume) -> Result<()> {
        sqlx::query(
            "INSERT INTO resumes (id, filename, content, upload_date) VALUES ($1, $2, $3, $4)",
        )
        .bind(&resume.id)
        .bind(&resume.filename)
        .bind(&resume.content)
        .bind(resume.upload_date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_resume(&self, id: &str) -> Result<Option<Resume>> {
        Ok(sqlx::query_as::<_, Resume>(
            "SELECT id, filename, content, upload_date FROM resumes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn latest_scores(&self, resume_id: &str) -> Result<Option<(Uuid, ScoreSet)>> {
        let row = sqlx::query_as::<_, ScoreRow>(
            r#"
            SELECT analysis_id, resume_id, overall_score, content_score, formatting_score, impact_score, ats_score
            FROM resume_scores
            WHERE resume_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(resume_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn feedback_for_analysis(&self, analysis_id: Uuid) -> Result<Vec<FeedbackItem>> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            r#"
            SELECT resume_id, type, title, category, section, feedback, severity, suggestion, source
            FROM resume_feedback
            WHERE analysis_id = $1
            ORDER BY id
            "#,
        )
        .bind(analysis_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(FeedbackItem::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feedback::FeedbackType;

    fn row(kind: &str) -> FeedbackRow {
        FeedbackRow {
            resume_id: "r1".to_string(),
            kind: kind.to_string(),
            title: "Action Verbs".to_string(),
            category: "Content Quality".to_string(),
            section: "Work Experience".to_string(),
            feedback: "Lead with a verb.".to_string(),
            severity: None,
            suggestion: None,
            source: None,
        }
    }

    #[test]
    fn test_feedback_row_maps_columns() {
        let item = FeedbackItem::try_from(row("Strength")).unwrap();
        assert_eq!(item.kind, FeedbackType::Strength);
        assert_eq!(item.category, "Content Quality");
        assert_eq!(item.description, "Lead with a verb.");
        assert_eq!(item.severity, DEFAULT_SEVERITY);
    }

    #[test]
    fn test_unknown_feedback_type_is_not_relabelled() {
        assert!(FeedbackItem::try_from(row("praise")).is_err());
    }
}
