//! Assistant model configuration.

use serde::{Deserialize, Serialize};

/// Which assistant implementation to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantProvider {
    /// Fixed placeholder replies.
    #[default]
    Stub,
    /// Local Ollama server.
    Ollama,
}

impl AssistantProvider {
    /// Label used in logs and metrics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stub => "stub",
            Self::Ollama => "ollama",
        }
    }
}

/// Assistant configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Implementation to use.
    #[serde(default)]
    pub provider: AssistantProvider,
    /// Ollama base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name passed to Ollama.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Number of scoped chat messages sent as context.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// System prompt prepended to every conversation.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            provider: AssistantProvider::default(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            history_limit: default_history_limit(),
            system_prompt: default_system_prompt(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.1".to_string()
}

const fn default_timeout_secs() -> u64 {
    120
}

const fn default_history_limit() -> usize {
    20
}

fn default_system_prompt() -> String {
    "You are a clinical assistant for a counselling practitioner. Answer concisely and \
     never invent client details."
        .to_string()
}
