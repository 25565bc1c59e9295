use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::mail::Mailer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable mail transport. Default: `SmtpMailer`.
    pub mailer: Arc<dyn Mailer>,
    pub config: Config,
}
