//! Session state for one upload → generate → send cycle.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Which screen of the workflow is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    #[default]
    Collecting,
    Reviewing,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Collecting => f.write_str("collecting"),
            Step::Reviewing => f.write_str("reviewing"),
        }
    }
}

/// Selects the required fields, the generation template and the send payload shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailType {
    #[default]
    Application,
    Inquiry,
}

impl EmailType {
    /// Wire name, used as the `template` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailType::Application => "application",
            EmailType::Inquiry => "inquiry",
        }
    }
}

impl fmt::Display for EmailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "application" => Ok(EmailType::Application),
            "inquiry" => Ok(EmailType::Inquiry),
            other => Err(format!("unknown email type '{other}'")),
        }
    }
}

/// Exactly one of these holds at a time. Entering `Pending` drops any previous message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Pending,
    Error(String),
    Success(String),
}

impl Status {
    pub fn is_pending(&self) -> bool {
        matches!(self, Status::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success(_))
    }

    /// The user-facing message, if the status carries one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Status::Error(msg) | Status::Success(msg) => Some(msg),
            Status::Idle | Status::Pending => None,
        }
    }
}

/// An uploaded résumé. Content is opaque to the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    pub content: Bytes,
}

impl ResumeFile {
    /// Builds a résumé from memory, inferring the content type from the file extension.
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            content: content.into(),
        }
    }

    /// Reads a résumé from disk.
    pub async fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        Ok(Self::new(file_name, content))
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => PDF_CONTENT_TYPE,
        Some("docx") => DOCX_CONTENT_TYPE,
        _ => FALLBACK_CONTENT_TYPE,
    }
}

/// The complete mutable state of one interaction cycle.
///
/// `Session::default()` is the freshly mounted state; `reset()` returns to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub step: Step,
    pub email_type: EmailType,
    pub resume: Option<ResumeFile>,
    pub company_name: String,
    pub job_title: String,
    pub hiring_manager_name: String,
    pub recipient_email: String,
    pub draft_body: String,
    pub status: Status,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
