//! Answer service for the Grounded Q&A system.
//!
//! This crate holds the one component that matters: a service that
//! forwards a question to a remote model endpoint with web-search
//! grounding enabled, retries transient failures with exponential
//! backoff, and returns a normalized answer plus citation sources.
//!
//! The service is total: for any input string it returns an [`Answer`]
//! and never surfaces an error to its callers. The CLI loop and the web
//! handler need no error-handling path beyond reading the returned text.
//!
//! # Example
//! ```no_run
//! use grounded_core::AppConfig;
//! use grounded_llm::create_service;
//!
//! # async fn example() -> grounded_core::AppResult<()> {
//! let service = create_service(&AppConfig::load())?;
//! let answer = service.answer("Who maintains the Rust toolchain?").await;
//! println!("{}", answer.text);
//! for source in &answer.sources {
//!     println!("{} ({})", source.title, source.uri);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod service;

// Re-export main types
pub use client::{Answer, Attribution, Candidate, GenerationRequest, GenerationResponse,
    ModelClient, Source};
pub use factory::{create_client, create_service};
pub use providers::{GeminiClient, MockClient};
pub use service::{AnswerService, RetryPolicy};
