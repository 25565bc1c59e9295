//! Outbound mail: template rendering and SMTP dispatch.

use async_trait::async_trait;
use thiserror::Error;

pub mod handlers;
pub mod smtp;
pub mod templates;

pub use smtp::SmtpMailer;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("Failed to render template: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("SMTP send failed: {0}")]
    Transport(String),

    #[error("Mail task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A rendered HTML email, ready to hand to a `Mailer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Carried in `AppState` as `Arc<dyn Mailer>`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: HtmlEmail) -> Result<(), MailError>;
}
