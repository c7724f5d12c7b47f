//! Assistant model adapters.

mod ollama;

pub use ollama::OllamaAssistant;
