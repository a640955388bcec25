mod client;
mod extract;
mod prompt;

pub use client::{AiClient, AiError, DEFAULT_MODELS};
pub use extract::{Extraction, NOT_FOUND, parse_analysis};
pub use prompt::{PROBLEM_PREFIX_LIMIT, analysis_prompt, chat_prompt, tutorial_prompt};
