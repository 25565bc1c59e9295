use thiserror::Error;

use crate::workflow::session::Step;
use crate::workflow::validation::{MISSING_RECIPIENT, MISSING_REQUIRED_FIELDS};

pub const GENERATION_FAILED: &str = "Upload failed. Make sure the file is a PDF or DOCX.";
pub const SEND_FAILED: &str = "Failed to send email. Please try again.";
pub const SEND_SUCCEEDED: &str = "Email sent successfully!";

/// Outcome of a rejected or failed transition.
///
/// `Validation`, `GenerationFailed` and `SendFailed` are user-facing and are
/// mirrored into `Session::status`. The remaining variants are caller errors
/// and leave the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Upload failed. Make sure the file is a PDF or DOCX.")]
    GenerationFailed,

    #[error("Failed to send email. Please try again.")]
    SendFailed,

    #[error("'{operation}' is not allowed while {step}")]
    WrongStep {
        operation: &'static str,
        step: Step,
    },

    #[error("A request is already in flight")]
    RequestPending,

    #[error("No request is in flight")]
    NothingPending,

    #[error("Reset is only available after a successful send")]
    NotCompleted,
}

impl WorkflowError {
    pub(crate) fn missing_required_fields() -> Self {
        WorkflowError::Validation(MISSING_REQUIRED_FIELDS)
    }

    pub(crate) fn missing_recipient() -> Self {
        WorkflowError::Validation(MISSING_RECIPIENT)
    }

    /// True for errors the user sees in the session status.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            WorkflowError::Validation(_)
                | WorkflowError::GenerationFailed
                | WorkflowError::SendFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages_match_status_text() {
        assert_eq!(
            WorkflowError::missing_required_fields().to_string(),
            "Please fill all required fields."
        );
        assert_eq!(
            WorkflowError::missing_recipient().to_string(),
            "Please enter the recipient email."
        );
        assert_eq!(WorkflowError::GenerationFailed.to_string(), GENERATION_FAILED);
        assert_eq!(WorkflowError::SendFailed.to_string(), SEND_FAILED);
    }

    #[test]
    fn test_caller_errors_are_not_user_facing() {
        let err = WorkflowError::WrongStep {
            operation: "send",
            step: Step::Collecting,
        };
        assert_eq!(err.to_string(), "'send' is not allowed while collecting");
        assert!(!err.is_user_facing());
        assert!(!WorkflowError::RequestPending.is_user_facing());
        assert!(WorkflowError::SendFailed.is_user_facing());
    }
}
