pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::home_handler))
        .route("/health", get(health::health_handler))
        .route("/analyze", post(handlers::handle_analyze))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::extraction::DocumentExtractor;

    const BOUNDARY: &str = "resume-analyzer-test-boundary";

    const RESUME: &str = "Jane Doe\njane@doe.dev | (555) 123-4567\n\
                          Summary\nBackend engineer.\n\
                          Experience\n- Led data team, 2019 - 2023\n- Built analysis system\n\
                          Education\nBSc, State University\n\
                          Skills\nRust, Python";

    const JD: &str = "Seeking a backend engineer to lead our data platform team, \
                      building analysis systems in Rust and Python.";

    fn app_with(dir: &Path, configure: impl FnOnce(&mut Config)) -> Router {
        let mut config = Config {
            upload_dir: dir.to_path_buf(),
            ..Config::default()
        };
        configure(&mut config);
        build_router(AppState {
            extractor: Arc::new(DocumentExtractor::new(config.upload_dir.clone())),
            config,
        })
    }

    fn app(dir: &Path) -> Router {
        app_with(dir, |_| {})
    }

    /// `(field name, filename, contents)`; a `None` filename makes a plain text field.
    fn multipart_request(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, filename, contents) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(contents);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_home_lists_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(app(dir.path()), get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"], serde_json::json!(["/analyze"]));
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health_ok() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(app(dir.path()), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(app(dir.path()), get_request("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_analyze_txt_with_job_description() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request(&[
            ("resume", Some("Jane Doe Resume.txt"), RESUME),
            ("job_description", None, JD),
            ("utm_source", None, "ignored"),
        ]);

        let (status, body) = send(app(dir.path()), request).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["success"], true);
        assert_eq!(body["filename"], "Jane_Doe_Resume.txt");
        assert_eq!(body["resume_text"], RESUME);
        assert_eq!(body["word_count"], RESUME.split_whitespace().count());
        assert_eq!(body["character_count"], RESUME.chars().count());

        let sections = &body["sections"];
        assert_eq!(sections.as_object().unwrap().len(), 8);
        for key in ["contact_info", "summary", "experience", "education", "skills"] {
            assert_eq!(sections[key], true, "{key}");
        }
        assert_eq!(body["contact"]["email"], "jane@doe.dev");

        let score = &body["score"];
        let sum: u64 = [
            "section_score",
            "length_score",
            "keyword_score",
            "formatting_score",
            "jd_match_score",
        ]
        .iter()
        .map(|k| score[*k].as_u64().unwrap())
        .sum();
        assert_eq!(score["overall_score"].as_u64().unwrap(), sum);
        assert_eq!(score["section_score"], 23);
        assert!(score["jd_match_score"].as_u64().unwrap() > 0);

        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_analyze_docx_upload() {
        let dir = tempfile::tempdir().unwrap();
        let docx = crate::extraction::formats::tests::build_docx(&["Jane", "Experience"]);

        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; \
                 filename=\"cv.docx\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(&docx);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, body) = send(app(dir.path()), request).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["resume_text"], "Jane\nExperience");
        assert_eq!(body["sections"]["experience"], true);
    }

    #[tokio::test]
    async fn test_analyze_without_resume_field() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request(&[("job_description", None, JD)]);

        let (status, body) = send(app(dir.path()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "No resume file provided");
    }

    #[tokio::test]
    async fn test_analyze_with_empty_filename() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request(&[("resume", Some(""), RESUME)]);

        let (status, body) = send(app(dir.path()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "No file selected");
    }

    #[tokio::test]
    async fn test_analyze_rejects_unsupported_type() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request(&[("resume", Some("resume.exe"), RESUME)]);

        let (status, body) = send(app(dir.path()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Invalid file type. Only PDF, DOCX, TXT allowed"
        );
    }

    #[tokio::test]
    async fn test_analyze_respects_configured_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(dir.path(), |config| {
            config.allowed_extensions = vec![crate::extraction::formats::FileKind::Pdf];
        });
        let request = multipart_request(&[("resume", Some("resume.txt"), RESUME)]);

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Invalid file type. Only PDF allowed");
    }

    #[tokio::test]
    async fn test_analyze_blank_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request(&[("resume", Some("blank.txt"), "   \n  ")]);

        let (status, body) = send(app(dir.path()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "EXTRACTION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Could not extract text from resume"
        );
    }

    #[tokio::test]
    async fn test_analyze_rejects_oversized_upload() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(dir.path(), |config| config.max_upload_bytes = 256);
        let big = "word ".repeat(1_000);
        let request = multipart_request(&[("resume", Some("resume.txt"), big.as_str())]);

        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
