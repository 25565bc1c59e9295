//! Résumé text extraction for the two accepted upload formats.
//!
//! PDF goes through `pdf-extract`. DOCX is a zip container; the body text
//! lives in the `<w:t>` runs of `word/document.xml`.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use bytes::Bytes;
use regex::Regex;
use thiserror::Error;

use crate::workflow::session::{DOCX_CONTENT_TYPE, PDF_CONTENT_TYPE};

const DOCX_BODY_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid or unsupported file type")]
    UnsupportedType,

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read DOCX: {0}")]
    Docx(String),

    #[error("No text found in the uploaded resume")]
    Empty,

    #[error("Extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

impl ResumeFormat {
    /// Case-insensitive match on the declared upload content type.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        if content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE) {
            Some(ResumeFormat::Pdf)
        } else if content_type.eq_ignore_ascii_case(DOCX_CONTENT_TYPE) {
            Some(ResumeFormat::Docx)
        } else {
            None
        }
    }
}

/// Extracts plain text off the async runtime. Parser panics surface as `Join`.
pub async fn extract_resume_text(format: ResumeFormat, content: Bytes) -> Result<String, ExtractError> {
    let text = tokio::task::spawn_blocking(move || match format {
        ResumeFormat::Pdf => extract_pdf(&content),
        ResumeFormat::Docx => extract_docx(&content),
    })
    .await??;

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(text)
}

fn extract_pdf(content: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(content).map_err(|e| ExtractError::Pdf(e.to_string()))
}

fn extract_docx(content: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(content)).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut part = archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    Ok(document_xml_to_text(&xml))
}

fn docx_token_regex() -> &'static Regex {
    static TOKENS: OnceLock<Regex> = OnceLock::new();
    TOKENS.get_or_init(|| {
        Regex::new(r#"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab/>|<w:br\b[^>]*/>|</w:p>"#)
            .expect("static regex")
    })
}

/// Flattens WordprocessingML into text: one line per paragraph.
fn document_xml_to_text(xml: &str) -> String {
    let mut text = String::new();
    for token in docx_token_regex().captures_iter(xml) {
        match token.get(1) {
            Some(run) => text.push_str(&unescape_xml(run.as_str())),
            None if &token[0] == "<w:tab/>" => text.push('\t'),
            // paragraph end or line break
            None => text.push('\n'),
        }
    }
    text
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
