//! In-memory `Store` for tests.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::feedback::{FeedbackItem, ScoreSet};
use crate::models::insight::InsightRecord;
use crate::models::resume::Resume;
use crate::store::Store;

#[derive(Default)]
struct Tables {
    insights: Vec<InsightRecord>,
    feedback: Vec<(Uuid, FeedbackItem)>,
    scores: Vec<(Uuid, ScoreSet)>,
    resumes: Vec<Resume>,
    insight_attempts: usize,
}

/// Vec-backed tables. `fail_insight_attempt` makes the nth insight insert (0-based) fail.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_insight_attempt: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_insight_insert(attempt: usize) -> Self {
        Self {
            fail_insight_attempt: Some(attempt),
            ..Self::default()
        }
    }

    pub fn with_insights(records: Vec<InsightRecord>) -> Self {
        let store = Self::default();
        store.tables.lock().unwrap().insights = records;
        store
    }

    pub fn insights(&self) -> Vec<InsightRecord> {
        self.tables.lock().unwrap().insights.clone()
    }

    pub fn feedback(&self) -> Vec<FeedbackItem> {
        let tables = self.tables.lock().unwrap();
        tables.feedback.iter().map(|(_, f)| f.clone()).collect()
    }

    pub fn scores(&self) -> Vec<ScoreSet> {
        let tables = self.tables.lock().unwrap();
        tables.scores.iter().map(|(_, s)| s.clone()).collect()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn count_insights(&self) -> Result<i64> {
        Ok(self.tables.lock().unwrap().insights.len() as i64)
    }

    async fn recent_insights(&self, limit: i64) -> Result<Vec<InsightRecord>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .insights
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn insert_insight(&self, record: &InsightRecord) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        let attempt = tables.insight_attempts;
        tables.insight_attempts += 1;
        if self.fail_insight_attempt == Some(attempt) {
            return Err(anyhow!("insert {attempt} rejected"));
        }
        tables.insights.push(record.clone());
        Ok(())
    }

    async fn insert_feedback(&self, analysis_id: Uuid, item: &FeedbackItem) -> Result<()> {
        self.tables
            .lock()
            .unwrap()
            .feedback
            .push((analysis_id, item.clone()));
        Ok(())
    }

    async fn insert_scores(&self, analysis_id: Uuid, scores: &ScoreSet) -> Result<()> {
        self.tables
            .lock()
            .unwrap()
            .scores
            .push((analysis_id, scores.clone()));
        Ok(())
    }

    async fn insert_resume(&self, resume: &Resume) -> Result<()> {
        self.tables.lock().unwrap().resumes.push(resume.clone());
        Ok(())
    }

    async fn get_resume(&self, id: &str) -> Result<Option<Resume>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .resumes
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn latest_scores(&self, resume_id: &str) -> Result<Option<(Uuid, ScoreSet)>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .scores
            .iter()
            .rev()
            .find(|(_, s)| s.resume_id == resume_id)
            .cloned())
    }

    async fn feedback_for_analysis(&self, analysis_id: Uuid) -> Result<Vec<FeedbackItem>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .feedback
            .iter()
            .filter(|(id, _)| *id == analysis_id)
            .map(|(_, f)| f.clone())
            .collect())
    }
}
