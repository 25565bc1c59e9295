//! Résumé outreach workflow: collect inputs, generate a draft, review it, send it.
//!
//! `WorkflowController` owns the single mutable `Session` and is the only writer.
//! Every network-facing transition goes through the `EmailBackend` collaborator.

pub mod controller;
pub mod error;
pub mod session;
pub mod validation;

pub use controller::WorkflowController;
pub use error::WorkflowError;
pub use session::{EmailType, ResumeFile, Session, Status, Step};
