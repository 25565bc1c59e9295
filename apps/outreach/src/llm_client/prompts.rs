// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Persona line opening every prompt.
pub const ASSISTANT_PERSONA: &str = "You are an expert job assistant.";

/// Output discipline appended to every email prompt.
pub const PLAIN_BODY_INSTRUCTION: &str = "Do not include any subject line or heading. \
    Keep the tone confident and professional. \
    Do not add any extra explanation or context.";
