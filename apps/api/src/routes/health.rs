use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status and which providers are configured, in fallback order.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let providers: Vec<&str> = state.pipeline.providers().iter().map(|p| p.name()).collect();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "reviewlens-api",
        "providers": providers
    }))
}
