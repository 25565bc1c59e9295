//! Collaborator contract — the two operations the workflow calls but does not implement.
//!
//! `HttpEmailBackend` talks to the outreach API over HTTP. Tests swap in a mock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::workflow::session::{EmailType, ResumeFile};

pub mod http;

pub use http::HttpEmailBackend;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Generation response carried no email text")]
    MalformedResponse,
}

/// Input for `generate_email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateEmailRequest {
    pub resume: ResumeFile,
    pub company_name: String,
    /// May be empty for inquiries.
    pub job_title: String,
    pub template: EmailType,
}

/// Raw generation result. The backend answers either `{"emailBody": "..."}` or bare text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum GeneratedEmail {
    Text(String),
    Structured {
        #[serde(rename = "emailBody", default)]
        email_body: Option<String>,
    },
}

/// Normalises either result shape to the trimmed draft text.
///
/// A structured result with an empty `emailBody`, or text that is blank after
/// trimming, yields `MalformedResponse`.
pub fn normalize_generated(generated: GeneratedEmail) -> Result<String, BackendError> {
    let text = match generated {
        GeneratedEmail::Structured {
            email_body: Some(body),
        } => body,
        GeneratedEmail::Text(text) => text,
        GeneratedEmail::Structured { email_body: None } => {
            return Err(BackendError::MalformedResponse)
        }
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(BackendError::MalformedResponse);
    }
    Ok(trimmed.to_string())
}

/// Query parameters of the job application send operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationEmail {
    pub to: String,
    #[serde(default)]
    pub job_title: String,
    pub body: String,
}

/// Query parameters of the general inquiry send operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryEmail {
    pub to: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub hiring_manager_name: String,
    pub body: String,
}

/// The send payload, shaped by the session's email type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendEmailRequest {
    Application(ApplicationEmail),
    Inquiry(InquiryEmail),
}

impl SendEmailRequest {
    pub fn kind(&self) -> EmailType {
        match self {
            SendEmailRequest::Application(_) => EmailType::Application,
            SendEmailRequest::Inquiry(_) => EmailType::Inquiry,
        }
    }

    pub fn recipient(&self) -> &str {
        match self {
            SendEmailRequest::Application(email) => &email.to,
            SendEmailRequest::Inquiry(email) => &email.to,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailBackend: Send + Sync {
    async fn generate_email(
        &self,
        request: GenerateEmailRequest,
    ) -> Result<GeneratedEmail, BackendError>;

    /// Acknowledgement only; any failure is reported uniformly.
    async fn send_email(&self, request: SendEmailRequest) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_body_is_trimmed() {
        let generated = GeneratedEmail::Structured {
            email_body: Some("  Hi there  ".to_string()),
        };
        assert_eq!(normalize_generated(generated).unwrap(), "Hi there");
    }

    #[test]
    fn test_bare_text_is_trimmed() {
        let generated = GeneratedEmail::Text("\nDear team,\nhello\n".to_string());
        assert_eq!(normalize_generated(generated).unwrap(), "Dear team,\nhello");
    }

    #[test]
    fn test_structured_without_body_is_malformed() {
        let generated = GeneratedEmail::Structured { email_body: None };
        assert!(matches!(
            normalize_generated(generated),
            Err(BackendError::MalformedResponse)
        ));
    }

    #[test]
    fn test_blank_text_is_malformed() {
        assert!(normalize_generated(GeneratedEmail::Text("   ".to_string())).is_err());
    }

    #[test]
    fn test_generated_email_deserializes_both_shapes() {
        let structured: GeneratedEmail =
            serde_json::from_str(r#"{"emailBody": "Hello", "model": "llama3"}"#).unwrap();
        assert_eq!(
            structured,
            GeneratedEmail::Structured {
                email_body: Some("Hello".to_string())
            }
        );

        let text: GeneratedEmail = serde_json::from_str(r#""Hello""#).unwrap();
        assert_eq!(text, GeneratedEmail::Text("Hello".to_string()));

        let missing: GeneratedEmail = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert_eq!(missing, GeneratedEmail::Structured { email_body: None });
    }

    #[test]
    fn test_send_payloads_use_camel_case_names() {
        let inquiry = InquiryEmail {
            to: "x@y.com".to_string(),
            company_name: "Acme".to_string(),
            hiring_manager_name: String::new(),
            body: "Hi".to_string(),
        };
        let value = serde_json::to_value(&inquiry).unwrap();
        assert_eq!(value["companyName"], "Acme");
        assert_eq!(value["hiringManagerName"], "");

        let request = SendEmailRequest::Inquiry(inquiry);
        assert_eq!(request.kind(), EmailType::Inquiry);
        assert_eq!(request.recipient(), "x@y.com");
    }
}
