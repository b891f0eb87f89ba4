use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and the active scoring policy.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let policy = if state.config.semantic_similarity_enabled {
        "semantic"
    } else {
        "traditional"
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobfit",
        "scoring_policy": policy
    }))
}
