//! HTML templates for the two send operations.
//!
//! Templates are embedded at compile time and rendered with HTML auto-escaping.
//! The `nl2br` filter escapes the email body and turns its newlines into `<br>`.

use std::sync::LazyLock;

use minijinja::value::Value;
use minijinja::{context, AutoEscape, Environment, HtmlEscape};

use crate::backend::{ApplicationEmail, InquiryEmail};
use crate::mail::{HtmlEmail, MailError};

const JOB_APPLICATION: &str = "job_application.html";
const JOB_INQUIRY: &str = "job_inquiry.html";

pub const INQUIRY_SUBJECT: &str = "Job Opening Inquiry";
const APPLICATION_SUBJECT_PREFIX: &str = "Job Application for -- ";
const DEFAULT_SALUTATION: &str = "Hiring Manager";

fn nl2br(value: String) -> Value {
    let escaped = HtmlEscape(value.trim()).to_string();
    Value::from_safe_string(escaped.replace("\r\n", "\n").replace('\n', "<br>\n"))
}

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.add_filter("nl2br", nl2br);
    env.add_template(
        JOB_APPLICATION,
        include_str!("../../templates/job_application.html"),
    )
    .expect("job application template parses");
    env.add_template(JOB_INQUIRY, include_str!("../../templates/job_inquiry.html"))
        .expect("job inquiry template parses");
    env
});

pub fn render_application(params: &ApplicationEmail) -> Result<HtmlEmail, MailError> {
    let html = ENV.get_template(JOB_APPLICATION)?.render(context! {
        job_title => &params.job_title,
        body_content => &params.body,
    })?;

    Ok(HtmlEmail {
        to: params.to.clone(),
        subject: format!("{APPLICATION_SUBJECT_PREFIX}{}", params.job_title),
        html,
    })
}

/// A blank hiring manager name falls back to a generic salutation.
pub fn render_inquiry(params: &InquiryEmail) -> Result<HtmlEmail, MailError> {
    let manager = match params.hiring_manager_name.trim() {
        "" => DEFAULT_SALUTATION,
        name => name,
    };
    let html = ENV.get_template(JOB_INQUIRY)?.render(context! {
        company_name => &params.company_name,
        hiring_manager_name => manager,
        inquiry_message => &params.body,
    })?;

    Ok(HtmlEmail {
        to: params.to.clone(),
        subject: INQUIRY_SUBJECT.to_string(),
        html,
    })
}
