use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::text::extract_resume_text;
use crate::errors::AppError;
use crate::models::feedback::{FeedbackItem, ScoreSet};
use crate::models::resume::Resume;
use crate::state::AppState;

const MISSING_FIELDS: &str = "Resume ID and text are required";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub resume_id: Option<String>,
    pub resume_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis_id: Uuid,
    pub feedback: Vec<FeedbackItem>,
    pub scores: ScoreSet,
    pub insights_used: usize,
    pub feedback_stored: usize,
    pub scores_stored: usize,
    #[serde(skip_serializing_if = "is_false")]
    pub mock: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Serialize)]
pub struct StoredAnalysis {
    pub resume_id: String,
    pub analysis_id: Uuid,
    pub grade: &'static str,
    pub scores: ScoreSet,
    pub feedback: Vec<FeedbackItem>,
}

fn required(value: Option<String>) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(MISSING_FIELDS.to_string()))
}

/// POST /api/v1/resumes/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let resume_id = required(req.resume_id)?;
    let resume_text = required(req.resume_text)?;

    let outcome = state.pipeline.analyze(&resume_id, &resume_text).await?;
    Ok(Json(AnalyzeResponse {
        success: true,
        analysis_id: outcome.analysis_id,
        mock: outcome.origin.is_mock(),
        feedback: outcome.feedback,
        scores: outcome.scores,
        insights_used: outcome.insights_used,
        feedback_stored: outcome.feedback_stored,
        scores_stored: outcome.scores_stored,
    }))
}

/// POST /api/v1/resumes
/// Multipart upload; the `file` part holds a PDF, DOCX or plain-text resume.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("resume").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        let content = extract_resume_text(&filename, content_type.as_deref(), data)
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if content.is_empty() {
            return Err(AppError::Validation(
                "No text could be extracted from the uploaded file".to_string(),
            ));
        }

        let resume = Resume {
            id: Uuid::new_v4().to_string(),
            filename,
            content,
            upload_date: Utc::now(),
        };
        state.store.insert_resume(&resume).await?;
        info!(
            "Stored resume {} ({}, {} chars)",
            resume.id,
            resume.filename,
            resume.content.chars().count()
        );

        return Ok((StatusCode::CREATED, Json(resume)));
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Resume>, AppError> {
    let resume = state
        .store
        .get_resume(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(resume))
}

/// GET /api/v1/resumes/:id/analysis
/// Latest score set plus the feedback written by that same run.
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredAnalysis>, AppError> {
    let (analysis_id, scores) = state
        .store
        .latest_scores(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No analysis found for resume {id}")))?;
    let feedback = state.store.feedback_for_analysis(analysis_id).await?;
    Ok(Json(StoredAnalysis {
        resume_id: id,
        analysis_id,
        grade: scores.grade(),
        scores,
        feedback,
    }))
}
