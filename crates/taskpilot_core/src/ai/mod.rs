//! Generative-text integration for study topics and activity analysis.
//!
//! # Responsibility
//! - Wrap the two prompt templates around a single text-generation call.
//! - Convert every service fault into a fallback value or display string.
//!
//! # Invariants
//! - Adapter operations never panic and never return an error outward.
//! - API keys and prompt bodies are never logged.
//! - No retries and no caching of previous results.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod adapter;
pub mod client;
pub mod prompts;
pub mod snapshot;

pub use adapter::AiAdapter;
pub use client::GeminiClient;
pub use snapshot::{ActivitySnapshot, TaskDigest};

/// One blocking text-generation call.
///
/// Implementations must be shareable with worker threads.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    /// HTTP client could not be constructed.
    Client(String),
    /// Network failure, timeout, or unreadable body.
    Transport(String),
    /// The service answered with a non-success status.
    Status { code: u16, message: String },
    /// The service refused the prompt.
    Blocked(String),
    /// The response body did not match the expected shape.
    Decode(String),
}

impl Display for AiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client(message) => write!(f, "failed to build http client: {message}"),
            Self::Transport(message) => write!(f, "request failed: {message}"),
            Self::Status { code, message } => write!(f, "service returned {code}: {message}"),
            Self::Blocked(reason) => write!(f, "prompt blocked: {reason}"),
            Self::Decode(message) => write!(f, "unexpected response: {message}"),
        }
    }
}

impl Error for AiError {}

impl AiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Client(_) => "client",
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Blocked(_) => "blocked",
            Self::Decode(_) => "decode",
        }
    }
}
