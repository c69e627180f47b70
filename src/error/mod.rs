//! Error types for the journalist pipeline.

use thiserror::Error;

use crate::types::AgentRole;

/// Primary error type for all journalist operations.
#[derive(Error, Debug)]
pub enum JournalistError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Cannot resolve tool '{tool}': {reason}")]
    ToolResolution { tool: String, reason: String },

    #[error("Agent {caller} may not call tool '{tool}' (registered caller: {expected})")]
    UnauthorizedCaller {
        tool: String,
        caller: AgentRole,
        expected: AgentRole,
    },

    #[error("Agent {executor} may not execute tool '{tool}' (registered executor: {expected})")]
    UnauthorizedExecutor {
        tool: String,
        executor: AgentRole,
        expected: AgentRole,
    },

    #[error("Provider error: {provider}: {message}")]
    Provider { provider: String, message: String },

    #[error("Could not generate the article: no Writer message in the conversation")]
    NoArticleProduced,
}

impl JournalistError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a tool resolution error.
    pub fn tool_resolution(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ToolResolution {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Whether the front-end should report this as "could not generate the
    /// article" instead of as an internal failure.
    pub fn is_user_visible_failure(&self) -> bool {
        matches!(self, Self::NoArticleProduced)
    }

    /// Whether the run was refused before any conversation started.
    pub fn is_precondition_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential(_) | Self::Configuration(_) | Self::InvalidArgument(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, JournalistError>;
