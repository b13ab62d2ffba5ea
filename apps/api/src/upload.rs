use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::errors::AppError;
use crate::extraction::formats::FileKind;
use crate::extraction::UploadedResume;

/// Parsed form fields of an `/analyze` upload.
#[derive(Debug)]
pub struct ResumeForm {
    pub resume: UploadedResume,
    /// `None` when the field was missing or blank.
    pub job_description: Option<String>,
}

/// Reads the `resume` file and optional `job_description` text out of a multipart form.
/// Unknown fields are drained and ignored.
pub async fn parse_resume_form(
    mut multipart: Multipart,
    allowed: &[FileKind],
) -> Result<ResumeForm, AppError> {
    let mut resume = None;
    let mut job_description = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                resume = Some((filename, data));
            }
            "job_description" => {
                let text = field.text().await.map_err(multipart_error)?;
                if !text.trim().is_empty() {
                    job_description = Some(text);
                }
            }
            _ => {
                let _ = field.bytes().await;
            }
        }
    }

    let (raw_filename, data) =
        resume.ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;

    if raw_filename.is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }

    let kind = FileKind::from_filename(&raw_filename)
        .filter(|kind| allowed.contains(kind))
        .ok_or_else(|| AppError::Validation(invalid_type_message(allowed)))?;

    Ok(ResumeForm {
        resume: UploadedResume {
            filename: sanitize_filename(&raw_filename),
            kind,
            data,
        },
        job_description,
    })
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("Failed to read form field: {}", e.body_text()))
    }
}

fn invalid_type_message(allowed: &[FileKind]) -> String {
    let names: Vec<String> = allowed
        .iter()
        .map(|kind| kind.extension().to_uppercase())
        .collect();
    format!("Invalid file type. Only {} allowed", names.join(", "))
}

/// Reduces a client-supplied filename to a safe ASCII basename.
///
/// Keeps the last path component, turns whitespace runs into `_`, drops anything
/// outside `[A-Za-z0-9._-]`, and strips leading/trailing dots and underscores.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = cleaned.trim_matches(|c: char| c == '.' || c == '_');
    if trimmed.is_empty() {
        "resume".to_string()
    } else {
        trimmed.to_string()
    }
}
