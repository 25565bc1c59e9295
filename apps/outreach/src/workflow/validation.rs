//! Pure checks evaluated at the moment a network transition is attempted.

use crate::workflow::session::{EmailType, Session};

pub const MISSING_REQUIRED_FIELDS: &str = "Please fill all required fields.";
pub const MISSING_RECIPIENT: &str = "Please enter the recipient email.";

/// Résumé and company are always required; job title only for applications.
pub fn can_generate(session: &Session) -> bool {
    session.resume.is_some()
        && !session.company_name.is_empty()
        && (session.email_type != EmailType::Application || !session.job_title.is_empty())
}

/// Presence only. Address format is left to the mail transport.
pub fn can_send(session: &Session) -> bool {
    !session.recipient_email.is_empty()
}
