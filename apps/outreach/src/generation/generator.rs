//! Email generation — résumé text + job fields → prompt → LLM → email body.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{APPLICATION_PROMPT_TEMPLATE, INQUIRY_PROMPT_TEMPLATE};
use crate::llm_client::prompts::{ASSISTANT_PERSONA, PLAIN_BODY_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::workflow::session::EmailType;

/// Everything the prompt needs, already extracted from the upload.
#[derive(Debug, Clone)]
pub struct EmailBrief<'a> {
    pub resume_text: &'a str,
    pub company_name: &'a str,
    pub job_title: &'a str,
    pub template: EmailType,
    pub candidate_background: Option<&'a str>,
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("static regex"))
}

/// Fills the template for the brief's email type in one pass, so text inside
/// substituted values is never treated as a placeholder.
pub fn build_prompt(brief: &EmailBrief<'_>) -> String {
    let template = match brief.template {
        EmailType::Application => APPLICATION_PROMPT_TEMPLATE,
        EmailType::Inquiry => INQUIRY_PROMPT_TEMPLATE,
    };
    let background = brief
        .candidate_background
        .map(|b| format!("\n{}\n", b.trim()))
        .unwrap_or_default();

    placeholder_regex()
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "persona" => ASSISTANT_PERSONA.to_string(),
            "body_instruction" => PLAIN_BODY_INSTRUCTION.to_string(),
            "background" => background.clone(),
            "company_name" => brief.company_name.trim().to_string(),
            "job_title" => brief.job_title.trim().to_string(),
            "resume_text" => brief.resume_text.to_string(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// Generates the email body for a brief. The result is trimmed and non-empty.
pub async fn generate_email_body(llm: &LlmClient, brief: &EmailBrief<'_>) -> Result<String, AppError> {
    let prompt = build_prompt(brief);
    info!(
        "Generating {} email for {} with {} ({} prompt chars)",
        brief.template,
        brief.company_name,
        llm.model(),
        prompt.len()
    );
    let body = llm.call_text(&prompt).await?;
    info!("Generated email body ({} chars)", body.len());
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brief(template: EmailType) -> EmailBrief<'static> {
        EmailBrief {
            resume_text: "Jane Doe — Rust engineer, 6 years.",
            company_name: "Acme",
            job_title: "Backend Engineer",
            template,
            candidate_background: None,
        }
    }

    #[test]
    fn test_application_prompt_names_role_and_company() {
        let prompt = build_prompt(&brief(EmailType::Application));
        assert!(prompt.starts_with(ASSISTANT_PERSONA));
        assert!(prompt.contains("Jane Doe — Rust engineer, 6 years."));
        assert!(prompt.contains("position of Backend Engineer at Acme."));
        assert!(prompt.contains("max 80 words"));
        assert!(prompt.ends_with(PLAIN_BODY_INSTRUCTION));
    }

    #[test]
    fn test_inquiry_prompt_ignores_job_title() {
        let prompt = build_prompt(&brief(EmailType::Inquiry));
        assert!(prompt.contains("current or upcoming job openings at Acme."));
        assert!(!prompt.contains("Backend Engineer"));
    }

    #[test]
    fn test_background_is_inserted_after_resume() {
        let mut b = brief(EmailType::Inquiry);
        b.candidate_background = Some("  Previously full-stack at two startups.  ");
        let prompt = build_prompt(&b);
        let resume_at = prompt.find("Jane Doe").unwrap();
        let background_at = prompt.find("Previously full-stack at two startups.").unwrap();
        assert!(background_at > resume_at);
    }

    #[test]
    fn test_placeholder_text_in_values_is_not_expanded() {
        let mut b = brief(EmailType::Application);
        b.company_name = "Acme {resume_text}";
        let prompt = build_prompt(&b);
        assert_eq!(prompt.matches("Jane Doe").count(), 1);
        assert!(prompt.contains("at Acme {resume_text}."));
    }

    #[test]
    fn test_no_placeholders_left() {
        for template in [EmailType::Application, EmailType::Inquiry] {
            let prompt = build_prompt(&brief(template));
            assert!(!prompt.contains('{'), "unfilled placeholder in {prompt}");
        }
    }
}
