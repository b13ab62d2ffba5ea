use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Service banner listing the public endpoints.
pub async fn home_handler() -> Json<Value> {
    Json(json!({
        "message": "Resume Analyzer API is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/analyze"]
    }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-analyzer"
    }))
}
