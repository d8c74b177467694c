// Personal statement generation.
// One multipart submission in, one Gemini call out, one HTML fragment back.
// All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod request;
pub mod sanitize;
