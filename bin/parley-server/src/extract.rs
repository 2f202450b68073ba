//! Document text extraction.
//!
//! Uploads branch on a [`DocumentKind`] derived from the file extension;
//! each variant owns its decoder. The decoders themselves (PDF, DOCX) are
//! opaque third-party libraries turning bytes into text.

use std::path::Path;

use thiserror::Error;

/// Number of preview characters returned to the caller after an upload.
pub const PREVIEW_CHARS: usize = 500;

/// Errors produced while decoding uploaded bytes into text.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("PDF parse error: {0}")]
    Pdf(String),

    #[error("DOCX parse error: {0}")]
    Docx(String),
}

/// Supported document formats, keyed on the upload's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Determine the format from the uploaded file name.
    ///
    /// Returns `None` for anything but `.txt`, `.pdf`, or `.docx`
    /// (case-insensitive).
    pub fn from_filename(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "txt" => Some(DocumentKind::Text),
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    /// Decode `bytes` into plain text according to the format.
    pub fn extract_text(self, bytes: Vec<u8>) -> Result<String, ExtractError> {
        match self {
            DocumentKind::Text => Ok(String::from_utf8(bytes)?),
            DocumentKind::Pdf => pdf_extract::extract_text_from_mem(&bytes)
                .map_err(|e| ExtractError::Pdf(e.to_string())),
            DocumentKind::Docx => docx_text(&bytes),
        }
    }
}

/// First `max_chars` characters of `text` (the whole text when shorter).
///
/// Boundaries are characters, not bytes, so multi-byte content is never
/// split mid-codepoint.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Pull the visible paragraph text out of a DOCX body, one line per
/// paragraph.
fn docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for paragraph_child in &paragraph.children {
                if let ParagraphChild::Run(run) = paragraph_child {
                    for run_child in &run.children {
                        if let RunChild::Text(text) = run_child {
                            line.push_str(&text.text);
                        }
                    }
                }
            }
            paragraphs.push(line);
        }
    }
    Ok(paragraphs.join("\n"))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
