//! Per-format plaintext decoding for PDF, DOCX and TXT resumes.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::extraction::ExtractionError;

/// Document formats the analyzer can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Docx,
    Txt,
}

impl FileKind {
    pub const SUPPORTED: [FileKind; 3] = [FileKind::Pdf, FileKind::Docx, FileKind::Txt];

    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
            FileKind::Txt => "txt",
        }
    }

    /// Case-insensitive; accepts the extension with or without a leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        Self::SUPPORTED
            .into_iter()
            .find(|kind| kind.extension() == ext)
    }

    /// Kind from the part after the last `.`; names without one have no kind.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        Self::from_extension(ext)
    }
}

/// Reads the file at `path` and decodes it according to `kind`.
pub fn extract_from_path(kind: FileKind, path: &Path) -> Result<String, ExtractionError> {
    match kind {
        FileKind::Pdf => {
            pdf_extract::extract_text(path).map_err(|e| ExtractionError::Pdf(e.to_string()))
        }
        FileKind::Docx => extract_docx(&std::fs::read(path)?),
        FileKind::Txt => Ok(String::from_utf8(std::fs::read(path)?)?),
    }
}

/// A DOCX is a ZIP archive; the body text lives in `word/document.xml`.
pub fn extract_docx(data: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| ExtractionError::Docx(format!("Failed to open DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::Docx(format!("Missing word/document.xml: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(format!("Failed to read word/document.xml: {e}")))?;

    document_xml_to_text(&xml)
}

/// Flattens WordprocessingML into text: one line per `<w:p>`, `<w:tab/>` as a tab,
/// `<w:br/>` and `<w:cr/>` as line breaks. Only `<w:t>` content is kept.
fn document_xml_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"w:t" {
                    in_text = true;
                }
            }
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractionError::Docx(format!("Bad text node: {e}")))?;
                current.push_str(&text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::Docx(format!(
                    "Malformed document.xml at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    Ok(paragraphs.join("\n"))
}
