// LLM prompt templates for outreach email generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Application prompt. Replace: {persona}, {resume_text}, {background},
/// {job_title}, {company_name}, {body_instruction}
pub const APPLICATION_PROMPT_TEMPLATE: &str = "{persona} Based on the following resume:

{resume_text}
{background}
Write a short and impactful cold email body (max 80 words) to apply for the position of {job_title} at {company_name}. {body_instruction}";

/// Inquiry prompt. Replace: {persona}, {resume_text}, {background},
/// {company_name}, {body_instruction}
pub const INQUIRY_PROMPT_TEMPLATE: &str = "{persona} Based on the following resume:

{resume_text}
{background}
Write a short and impactful cold email body (max 80 words) to inquire about any current or upcoming job openings at {company_name}. {body_instruction}";
