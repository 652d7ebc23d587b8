use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::insight::InsightRecord;
use crate::state::AppState;

/// Upper bound for `GET /api/v1/insights?limit=`.
pub const MAX_LIST_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct CollectRequest {
    pub subreddit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CollectResponse {
    pub success: bool,
    pub count: usize,
    pub posts_analyzed: usize,
    pub insights: Vec<InsightRecord>,
    pub stored: usize,
    #[serde(skip_serializing_if = "is_false")]
    pub mock: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// Topic names go straight into an upstream URL path.
fn validate_topic(raw: Option<String>) -> Result<String, AppError> {
    let topic = raw.map(|s| s.trim().to_string()).unwrap_or_default();
    if topic.is_empty() {
        return Err(AppError::Validation(
            "Subreddit parameter is required".to_string(),
        ));
    }
    if !topic.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AppError::Validation(format!(
            "Invalid subreddit name: {topic}"
        )));
    }
    Ok(topic)
}

/// POST /api/v1/insights/collect
pub async fn handle_collect(
    State(state): State<AppState>,
    payload: Result<Json<CollectRequest>, JsonRejection>,
) -> Result<Json<CollectResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let topic = validate_topic(req.subreddit)?;

    let outcome = state.pipeline.collect(&topic).await;
    Ok(Json(CollectResponse {
        success: true,
        count: outcome.insights.len(),
        posts_analyzed: outcome.posts_analyzed,
        mock: outcome.origin.is_mock(),
        insights: outcome.insights,
        stored: outcome.stored,
    }))
}

/// GET /api/v1/insights
pub async fn handle_list_insights(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<InsightRecord>>, AppError> {
    let limit = params.limit.unwrap_or(MAX_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
    let insights = state.store.recent_insights(limit).await?;
    Ok(Json(insights))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_topic_trims() {
        assert_eq!(validate_topic(Some("  resumes ".into())).unwrap(), "resumes");
    }

    #[test]
    fn test_validate_topic_rejects_missing_and_blank() {
        for raw in [None, Some(String::new()), Some("   ".into())] {
            match validate_topic(raw) {
                Err(AppError::Validation(msg)) => assert_eq!(msg, "Subreddit parameter is required"),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_topic_rejects_path_characters() {
        assert!(matches!(
            validate_topic(Some("jobs/../admin".into())),
            Err(AppError::Validation(_))
        ));
    }
}
