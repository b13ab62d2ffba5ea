use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::extraction::formats::FileKind;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Scratch directory for uploads while they are being extracted.
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub allowed_extensions: Vec<FileKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_extensions: FileKind::SUPPORTED.to_vec(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| defaults.max_upload_bytes.to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            allowed_extensions: match std::env::var("ALLOWED_EXTENSIONS") {
                Ok(raw) => parse_allowed_extensions(&raw)?,
                Err(_) => defaults.allowed_extensions,
            },
        })
    }
}

/// Parses a comma-separated extension list such as `pdf, .docx,TXT`.
pub fn parse_allowed_extensions(raw: &str) -> Result<Vec<FileKind>> {
    let mut kinds = Vec::new();
    for ext in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let kind = FileKind::from_extension(ext).with_context(|| {
            format!("Unsupported extension '{ext}' in ALLOWED_EXTENSIONS (supported: pdf, docx, txt)")
        })?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    if kinds.is_empty() {
        bail!("ALLOWED_EXTENSIONS must list at least one of: pdf, docx, txt");
    }
    Ok(kinds)
}
