//! Scripted mock model provider.
//!
//! Plays back a fixed script of results, one per `generate` call, and
//! counts attempts. Used to test the answer service's retry and
//! normalization behavior, and by the surface crates to exercise their
//! adapters without a network.

use crate::client::{GenerationRequest, GenerationResponse, ModelClient};
use grounded_core::{AppError, AppResult};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Mock provider for testing and development.
#[derive(Debug, Default)]
pub struct MockClient {
    script: Mutex<VecDeque<AppResult<GenerationResponse>>>,
    calls: AtomicU32,
}

impl MockClient {
    /// Create a mock with an empty script. Calls beyond the script fail
    /// with a terminal error, so an over-eager retry loop shows up in
    /// test assertions instead of hanging.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one result to the playback script.
    pub fn push(&self, result: AppResult<GenerationResponse>) {
        self.script
            .lock()
            .expect("mock script lock poisoned")
            .push_back(result);
    }

    /// Number of `generate` calls made so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ModelClient for MockClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, _request: &GenerationRequest) -> AppResult<GenerationResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        self.script
            .lock()
            .expect("mock script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Model("Mock script exhausted".to_string())))
    }
}
