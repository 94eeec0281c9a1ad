//! Resume file parsing: PDF, DOCX or plain text in, normalized text and skills out.

pub mod docx;
pub mod pdf;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::analysis::skills::extract_skills;
use crate::text::normalize_extracted;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("empty file uploaded")]
    Empty,

    #[error("PDF parsing error: {0}")]
    Pdf(String),

    #[error("DOCX parsing error: {0}")]
    Docx(String),

    #[error("no text could be extracted from {0}")]
    NoText(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Text,
}

impl FileKind {
    /// Decided by extension only; unknown extensions are read as text.
    pub fn from_filename(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("docx") | Some("doc") => Self::Docx,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResume {
    pub text: String,
    pub skills: BTreeMap<String, Vec<String>>,
    pub word_count: usize,
}

pub fn parse_resume(bytes: &[u8], filename: &str) -> Result<ParsedResume, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::Empty);
    }

    let kind = FileKind::from_filename(filename);
    let raw = match kind {
        FileKind::Pdf => pdf::extract_text(bytes)?,
        FileKind::Docx => docx::extract_text(bytes)?,
        FileKind::Text => String::from_utf8_lossy(bytes).into_owned(),
    };

    let text = normalize_extracted(&raw);
    if text.is_empty() {
        return Err(ExtractionError::NoText(filename.to_string()));
    }

    let word_count = text.split_whitespace().count();
    debug!(filename, ?kind, word_count, "Parsed resume file");

    Ok(ParsedResume {
        skills: extract_skills(&text),
        word_count,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(FileKind::from_filename("cv.PDF"), FileKind::Pdf);
        assert_eq!(FileKind::from_filename("cv.docx"), FileKind::Docx);
        assert_eq!(FileKind::from_filename("cv.doc"), FileKind::Docx);
        assert_eq!(FileKind::from_filename("cv.txt"), FileKind::Text);
        assert_eq!(FileKind::from_filename("resume"), FileKind::Text);
    }

    #[test]
    fn test_plain_text_resume() {
        let parsed = parse_resume(
            b"Jane Doe\n\nPython   developer * SQL, Docker & AWS",
            "jane.txt",
        )
        .unwrap();
        assert_eq!(parsed.text, "jane doe python developer sql, docker aws");
        assert_eq!(parsed.word_count, 7);
        assert_eq!(parsed.skills["programming"], vec!["Python", "Sql"]);
        assert_eq!(parsed.skills["cloud_devops"], vec!["Aws", "Docker"]);
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let parsed = parse_resume(b"nurse \xFF\xFE patient care", "cv.txt").unwrap();
        assert!(parsed.text.contains("patient care"));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(matches!(parse_resume(b"", "cv.txt"), Err(ExtractionError::Empty)));
        assert!(matches!(
            parse_resume(b"   \n\t ", "cv.txt"),
            Err(ExtractionError::NoText(_))
        ));
    }

    #[test]
    fn test_corrupt_binary_formats() {
        assert!(matches!(
            parse_resume(b"not a zip", "cv.docx"),
            Err(ExtractionError::Docx(_))
        ));
        assert!(matches!(
            parse_resume(b"not a pdf", "cv.pdf"),
            Err(ExtractionError::Pdf(_))
        ));
    }
}
