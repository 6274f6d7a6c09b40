//! Model client abstraction and request/response types.
//!
//! This module defines the seam between the answer service and the remote
//! model endpoint. The service speaks in provider-agnostic types; a
//! provider translates them to and from its own wire format.

use grounded_core::AppResult;
use serde::{Deserialize, Serialize};

/// Generation request sent to a model provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The prompt text — the user's question, verbatim
    pub prompt: String,

    /// System instruction (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Enable web-search-based grounding
    #[serde(default)]
    pub web_search: bool,
}

impl GenerationRequest {
    /// Create a new generation request for a prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            web_search: false,
        }
    }

    /// Set the system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Enable web-search grounding for this request.
    pub fn with_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }
}

/// Generation response returned by a model provider.
///
/// The shape is deliberately optional-tolerant: providers pass through
/// whatever the endpoint returned, and the answer service decides what a
/// usable response looks like.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated response options; only the first is used
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated response option.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    /// Generated text, absent when the endpoint returned no content parts
    pub text: Option<String>,

    /// Grounding attributions backing the text
    #[serde(default)]
    pub attributions: Vec<Attribution>,
}

/// A grounding attribution as returned by the endpoint.
///
/// Either field may be missing; only complete attributions are promoted
/// to [`Source`] entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attribution {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// A citation attributed to a web-search grounding result.
///
/// Never constructed partially: both fields are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

/// The normalized result of answering one question.
///
/// `sources` is always a sequence (possibly empty), never absent, so
/// callers need no optional-handling branch. Failures are carried in
/// `text` as human-readable messages with empty sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// The answer text, or an explanatory message on failure
    pub text: String,

    /// Citation sources, in the order the endpoint attributed them
    pub sources: Vec<Source>,
}

impl Answer {
    /// Build a terminal-failure answer: explanatory text, no sources.
    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }
}

/// Trait for model providers.
///
/// This trait abstracts the underlying model endpoint and lets tests
/// inject a scripted transport in place of the real HTTP client.
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    /// Get the provider name (e.g., "gemini", "mock").
    fn provider_name(&self) -> &str;

    /// Perform a single generation attempt.
    ///
    /// # Errors
    /// Returns `AppError::Transport` for connection failures, timeouts,
    /// and non-2xx statuses (retryable), and other variants for terminal
    /// failures such as an undecodable response body.
    async fn generate(&self, request: &GenerationRequest) -> AppResult<GenerationResponse>;
}
