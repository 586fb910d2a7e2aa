//! Assistant provider implementations for Hemonet.

pub mod gemini;
mod types;

pub use gemini::GeminiAssistant;
