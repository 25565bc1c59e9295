//! Workflow/state controller — the single writer of the `Session`.
//!
//! Transitions:
//!   Collecting --generate()--> Reviewing --send()--> Reviewing + Success --reset()--> Collecting
//!   Reviewing  --back()-->     Collecting
//!
//! Network transitions come in two flavours: the async `generate()` / `send()`
//! which call the collaborator themselves, and `begin_*` / `complete_*` pairs
//! for hosts that drive the I/O from their own event loop. Both share the same
//! validation and settlement code.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::{
    normalize_generated, ApplicationEmail, BackendError, EmailBackend, GenerateEmailRequest,
    GeneratedEmail, InquiryEmail, SendEmailRequest,
};
use crate::workflow::error::{WorkflowError, SEND_SUCCEEDED};
use crate::workflow::session::{EmailType, ResumeFile, Session, Status, Step};
use crate::workflow::validation::{can_generate, can_send};

pub struct WorkflowController {
    session: Session,
    backend: Arc<dyn EmailBackend>,
}

impl WorkflowController {
    pub fn new(backend: Arc<dyn EmailBackend>) -> Self {
        Self {
            session: Session::new(),
            backend,
        }
    }

    /// Read-only view for rendering.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn step(&self) -> Step {
        self.session.step
    }

    pub fn status(&self) -> &Status {
        &self.session.status
    }

    // ────────────────────────────────────────────────────────────────────────
    // Guards
    // ────────────────────────────────────────────────────────────────────────

    /// Rejects any mutation while a request is in flight, then checks the step.
    fn ensure(&self, operation: &'static str, step: Step) -> Result<(), WorkflowError> {
        if self.session.status.is_pending() {
            return Err(WorkflowError::RequestPending);
        }
        if self.session.step != step {
            return Err(WorkflowError::WrongStep {
                operation,
                step: self.session.step,
            });
        }
        Ok(())
    }

    fn ensure_settling(&self, operation: &'static str, step: Step) -> Result<(), WorkflowError> {
        if !self.session.status.is_pending() {
            return Err(WorkflowError::NothingPending);
        }
        if self.session.step != step {
            return Err(WorkflowError::WrongStep {
                operation,
                step: self.session.step,
            });
        }
        Ok(())
    }

    /// Mirrors a user-facing error into the status and hands it back.
    fn fail(&mut self, error: WorkflowError) -> WorkflowError {
        self.session.status = Status::Error(error.to_string());
        error
    }

    /// Callers have already ruled out `Pending`.
    fn clear_message(&mut self) {
        self.session.status = Status::Idle;
    }

    // ────────────────────────────────────────────────────────────────────────
    // Field edits
    // ────────────────────────────────────────────────────────────────────────

    /// Picking a new résumé invalidates the previous draft and any stale message.
    pub fn select_resume(&mut self, resume: ResumeFile) -> Result<(), WorkflowError> {
        self.ensure("select_resume", Step::Collecting)?;
        debug!(
            "Résumé selected: {} ({}, {} bytes)",
            resume.file_name,
            resume.content_type,
            resume.content.len()
        );
        self.session.resume = Some(resume);
        self.session.draft_body.clear();
        self.clear_message();
        Ok(())
    }

    pub fn set_company_name(&mut self, company_name: impl Into<String>) -> Result<(), WorkflowError> {
        self.ensure("set_company_name", Step::Collecting)?;
        self.session.company_name = company_name.into();
        Ok(())
    }

    pub fn set_job_title(&mut self, job_title: impl Into<String>) -> Result<(), WorkflowError> {
        self.ensure("set_job_title", Step::Collecting)?;
        self.session.job_title = job_title.into();
        Ok(())
    }

    pub fn set_hiring_manager_name(
        &mut self,
        hiring_manager_name: impl Into<String>,
    ) -> Result<(), WorkflowError> {
        self.ensure("set_hiring_manager_name", Step::Collecting)?;
        self.session.hiring_manager_name = hiring_manager_name.into();
        Ok(())
    }

    pub fn set_recipient_email(
        &mut self,
        recipient_email: impl Into<String>,
    ) -> Result<(), WorkflowError> {
        self.ensure("set_recipient_email", Step::Reviewing)?;
        self.session.recipient_email = recipient_email.into();
        Ok(())
    }

    /// Non-destructive: fields irrelevant to the new type are kept but ignored.
    pub fn change_email_type(&mut self, email_type: EmailType) -> Result<(), WorkflowError> {
        self.ensure("change_email_type", Step::Collecting)?;
        if self.session.email_type != email_type {
            info!("Email type changed to {email_type}");
        }
        self.session.email_type = email_type;
        Ok(())
    }

    pub fn edit_draft(&mut self, text: impl Into<String>) -> Result<(), WorkflowError> {
        self.ensure("edit_draft", Step::Reviewing)?;
        self.session.draft_body = text.into();
        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Generate
    // ────────────────────────────────────────────────────────────────────────

    /// Validates the collected fields and marks the session pending.
    /// Returns the request to hand to `EmailBackend::generate_email`.
    pub fn begin_generate(&mut self) -> Result<GenerateEmailRequest, WorkflowError> {
        self.ensure("generate", Step::Collecting)?;

        let resume = self
            .session
            .resume
            .clone()
            .filter(|_| can_generate(&self.session));
        let Some(resume) = resume else {
            warn!("Generation rejected: required fields missing");
            return Err(self.fail(WorkflowError::missing_required_fields()));
        };

        self.session.status = Status::Pending;
        info!(
            "Generating {} email for {}",
            self.session.email_type, self.session.company_name
        );

        Ok(GenerateEmailRequest {
            resume,
            company_name: self.session.company_name.clone(),
            job_title: self.session.job_title.clone(),
            template: self.session.email_type,
        })
    }

    /// Settles a generation started with `begin_generate`.
    pub fn complete_generate(
        &mut self,
        result: Result<GeneratedEmail, BackendError>,
    ) -> Result<(), WorkflowError> {
        self.ensure_settling("generate", Step::Collecting)?;

        match result.and_then(normalize_generated) {
            Ok(draft) => {
                info!("Draft generated ({} chars)", draft.len());
                self.session.draft_body = draft;
                self.session.step = Step::Reviewing;
                self.session.status = Status::Idle;
                Ok(())
            }
            Err(e) => {
                warn!("Email generation failed: {e}");
                Err(self.fail(WorkflowError::GenerationFailed))
            }
        }
    }

    /// Collecting → Reviewing via one call to the collaborator.
    ///
    /// If the future is dropped before the collaborator answers, the session
    /// settles to the generation failure instead of staying pending.
    pub async fn generate(&mut self) -> Result<(), WorkflowError> {
        let request = self.begin_generate()?;
        let backend = Arc::clone(&self.backend);
        let guard = SettleOnDrop::new(self, WorkflowError::GenerationFailed);
        let result = backend.generate_email(request).await;
        guard.controller.complete_generate(result)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Send
    // ────────────────────────────────────────────────────────────────────────

    /// Validates the recipient and marks the session pending.
    /// Returns the payload to hand to `EmailBackend::send_email`.
    pub fn begin_send(&mut self) -> Result<SendEmailRequest, WorkflowError> {
        self.ensure("send", Step::Reviewing)?;

        if !can_send(&self.session) {
            warn!("Send rejected: recipient missing");
            return Err(self.fail(WorkflowError::missing_recipient()));
        }

        self.session.status = Status::Pending;
        let request = self.build_send_request();
        info!(
            "Sending {} email to {}",
            request.kind(),
            request.recipient()
        );
        Ok(request)
    }

    fn build_send_request(&self) -> SendEmailRequest {
        let session = &self.session;
        match session.email_type {
            EmailType::Application => SendEmailRequest::Application(ApplicationEmail {
                to: session.recipient_email.clone(),
                job_title: session.job_title.clone(),
                body: session.draft_body.clone(),
            }),
            EmailType::Inquiry => SendEmailRequest::Inquiry(InquiryEmail {
                to: session.recipient_email.clone(),
                company_name: session.company_name.clone(),
                hiring_manager_name: session.hiring_manager_name.clone(),
                body: session.draft_body.clone(),
            }),
        }
    }

    /// Settles a send started with `begin_send`. Fields stay populated either way.
    pub fn complete_send(&mut self, result: Result<(), BackendError>) -> Result<(), WorkflowError> {
        self.ensure_settling("send", Step::Reviewing)?;

        match result {
            Ok(()) => {
                info!("Email sent to {}", self.session.recipient_email);
                self.session.status = Status::Success(SEND_SUCCEEDED.to_string());
                Ok(())
            }
            Err(e) => {
                warn!("Email send failed: {e}");
                Err(self.fail(WorkflowError::SendFailed))
            }
        }
    }

    /// Dispatches the reviewed draft via one call to the collaborator.
    /// A dropped future settles to the send failure, as in `generate()`.
    pub async fn send(&mut self) -> Result<(), WorkflowError> {
        let request = self.begin_send()?;
        let backend = Arc::clone(&self.backend);
        let guard = SettleOnDrop::new(self, WorkflowError::SendFailed);
        let result = backend.send_email(request).await;
        guard.controller.complete_send(result)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Navigation
    // ────────────────────────────────────────────────────────────────────────

    /// Reviewing → Collecting. Keeps every field, drops a stale message.
    pub fn back(&mut self) -> Result<(), WorkflowError> {
        self.ensure("back", Step::Reviewing)?;
        self.session.step = Step::Collecting;
        self.clear_message();
        Ok(())
    }

    /// Discards the session after a successful send.
    pub fn reset(&mut self) -> Result<(), WorkflowError> {
        if !self.session.status.is_success() {
            return Err(WorkflowError::NotCompleted);
        }
        info!("Session reset");
        self.session = Session::new();
        Ok(())
    }
}

/// Held across the collaborator call in the async wrappers. Once the call
/// settles the status is no longer `Pending` and dropping is a no-op.
struct SettleOnDrop<'a> {
    controller: &'a mut WorkflowController,
    failure: WorkflowError,
}

impl<'a> SettleOnDrop<'a> {
    fn new(controller: &'a mut WorkflowController, failure: WorkflowError) -> Self {
        Self { controller, failure }
    }
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        if self.controller.session.status.is_pending() {
            warn!("Request abandoned before it settled: {}", self.failure);
            self.controller.session.status = Status::Error(self.failure.to_string());
        }
    }
}
