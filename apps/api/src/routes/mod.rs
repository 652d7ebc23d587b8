pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::analysis::handlers as resumes;
use crate::insights::handlers as insights;
use crate::state::AppState;

/// Largest accepted request body (resume uploads).
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Insight collection
        .route("/api/v1/insights", get(insights::handle_list_insights))
        .route("/api/v1/insights/collect", post(insights::handle_collect))
        // Resumes
        .route("/api/v1/resumes", post(resumes::handle_upload_resume))
        .route("/api/v1/resumes/analyze", post(resumes::handle_analyze))
        .route("/api/v1/resumes/:id", get(resumes::handle_get_resume))
        .route(
            "/api/v1/resumes/:id/analysis",
            get(resumes::handle_get_analysis),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
