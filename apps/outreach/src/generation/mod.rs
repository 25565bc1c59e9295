// Email generation: résumé text extraction, prompt assembly, LLM call.
// All LLM calls go through llm_client.

pub mod extract;
pub mod generator;
pub mod handlers;
pub mod prompts;
