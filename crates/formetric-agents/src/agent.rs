//! Narrative generator trait and common agent types.

use async_trait::async_trait;
use formetric_core::ScoreReport;
use serde::{Deserialize, Serialize};

/// Result type for agent operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Agent error types
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("LLM inference error: {0}")]
    LlmError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prompt template error: {0}")]
    PromptError(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Rate limit exceeded")]
    RateLimit,
}

/// Generates opaque coach feedback text for a finished analysis.
///
/// Implementations must not influence the report itself; a failed
/// narration leaves the report intact.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Agent name/identifier
    fn name(&self) -> &str;

    /// Produce feedback text for a scored recording.
    async fn narrate(&self, report: &ScoreReport, exercise_id: &str) -> AgentResult<String>;
}

/// Agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model to use (e.g., "llama3-70b", "gpt-4")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// Timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "llama3-70b".to_string(),
            temperature: 0.7,
            max_tokens: 512,
            timeout_ms: 30_000,
        }
    }
}
