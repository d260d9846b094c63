//! Gateway to the Gemini generative API: brief generation (text-only) and
//! submission evaluation (vision + text), both constrained to typed JSON
//! through a response schema.

mod client;
mod prompts;
mod schema;

pub use client::{GeminiClient, GenerationError, fallback_feedback};
