//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::analysis::pipeline::{analyze_upload, AnalyzeResponse};
use crate::errors::AppError;
use crate::state::AppState;
use crate::upload::parse_resume_form;

/// POST /analyze
///
/// Multipart form: `resume` file (PDF, DOCX or TXT) and optional `job_description`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = parse_resume_form(multipart, &state.config.allowed_extensions).await?;
    let response = analyze_upload(state.extractor.as_ref(), form).await?;
    Ok(Json(response))
}
