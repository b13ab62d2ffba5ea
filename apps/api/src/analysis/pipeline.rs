//! Analysis orchestrator — extract text, detect sections, score, shape the response.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::scoring::{score_resume, ScoreBreakdown};
use crate::analysis::sections::{detect_sections, extract_contact_details, ContactDetails, SectionMap};
use crate::errors::AppError;
use crate::extraction::TextExtractor;
use crate::upload::ResumeForm;

/// Characters of resume text echoed back in the response.
pub const PREVIEW_CHARS: usize = 500;

/// Everything derived from one resume's text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeAnalysis {
    pub sections: SectionMap,
    pub contact: ContactDetails,
    pub score: ScoreBreakdown,
    pub word_count: usize,
    pub character_count: usize,
}

/// Response body for `POST /analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub filename: String,
    /// First [`PREVIEW_CHARS`] characters, with `...` appended when truncated.
    pub resume_text: String,
    #[serde(flatten)]
    pub analysis: ResumeAnalysis,
}

/// Runs detection then scoring over already-extracted text.
pub fn analyze_text(text: &str, job_description: Option<&str>) -> ResumeAnalysis {
    let sections = detect_sections(text);
    let score = score_resume(text, &sections, job_description);

    ResumeAnalysis {
        sections,
        contact: extract_contact_details(text),
        score,
        word_count: text.split_whitespace().count(),
        character_count: text.chars().count(),
    }
}

/// Full request flow: extraction must succeed before anything is scored.
pub async fn analyze_upload(
    extractor: &dyn TextExtractor,
    form: ResumeForm,
) -> Result<AnalyzeResponse, AppError> {
    let analysis_id = Uuid::new_v4();
    let ResumeForm {
        resume,
        job_description,
    } = form;

    let text = match extractor.extract(&resume).await {
        Ok(text) => text,
        Err(e) => {
            warn!(%analysis_id, filename = %resume.filename, "Text extraction failed: {e}");
            return Err(e.into());
        }
    };

    let analysis = analyze_text(&text, job_description.as_deref());

    info!(
        %analysis_id,
        filename = %resume.filename,
        word_count = analysis.word_count,
        overall_score = analysis.score.overall_score,
        "Resume analyzed"
    );

    Ok(AnalyzeResponse {
        success: true,
        analysis_id,
        analyzed_at: Utc::now(),
        filename: resume.filename,
        resume_text: preview(&text, PREVIEW_CHARS),
        analysis,
    })
}

fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
