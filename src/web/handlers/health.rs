//! Health check HTTP handler

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::web::AppState;

/// Liveness plus the configured cache backend
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "cache_backend": state.label_service.cache_backend(),
        "timestamp": chrono::Utc::now(),
    }))
}
