//! Answer service: bounded retry and response normalization.
//!
//! This is the single component both surfaces consume. It owns the fixed
//! system instruction, the retry loop with exponential backoff, and the
//! normalization of provider responses into [`Answer`] values.

use crate::client::{Answer, GenerationRequest, GenerationResponse, ModelClient, Source};
use std::sync::Arc;
use std::time::Duration;

/// System instruction sent with every question.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful and expert Question-Answering system. \
    Provide a concise and accurate answer based on the query, citing sources when they are used.";

/// Fixed message returned when the endpoint replied without usable content.
pub const EMPTY_RESPONSE_MESSAGE: &str = "API response was empty or malformed.";

/// Retry schedule for transient transport failures.
///
/// `max_attempts` counts total attempts including the first; the delay
/// before retry `i` (0-indexed) is `base_delay * 2^i`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Backoff delay before the retry following failed attempt `attempt`
    /// (0-indexed): 1, 2, 4, 8, ... base units.
    fn delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2_u32.pow(attempt)
    }
}

/// The answer service.
///
/// Stateless per call: each `answer()` invocation carries its own retry
/// state and touches nothing shared beyond the read-only client and
/// policy, so concurrent calls need no coordination.
pub struct AnswerService {
    client: Arc<dyn ModelClient>,
    retry: RetryPolicy,
}

impl AnswerService {
    /// Create a service over a model client with the given retry policy.
    pub fn new(client: Arc<dyn ModelClient>, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Answer a question.
    ///
    /// Total for any input string: transport failures are retried with
    /// exponential backoff and, like every other failure, end up as a
    /// well-formed [`Answer`] carrying an explanatory message. This
    /// method never returns an error and never panics.
    pub async fn answer(&self, question: &str) -> Answer {
        let request = GenerationRequest::new(question)
            .with_system(SYSTEM_INSTRUCTION)
            .with_web_search();

        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            match self.client.generate(&request).await {
                Ok(response) => return normalize(response),
                Err(e) if e.is_transient() => {
                    attempt += 1;

                    if attempt >= max_attempts {
                        tracing::error!("Giving up after {} attempts: {}", max_attempts, e);
                        return Answer::failure(format!(
                            "Error: Failed to reach the model endpoint after {} attempts. {}",
                            max_attempts, e
                        ));
                    }

                    let delay = self.retry.delay(attempt - 1);
                    tracing::warn!(
                        "Attempt {}/{} failed: {}. Retrying in {:?}",
                        attempt,
                        max_attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::error!("Terminal failure answering question: {}", e);
                    return Answer::failure(format!("An unexpected error occurred: {}", e));
                }
            }
        }
    }
}

/// Normalize a provider response into an [`Answer`].
///
/// The first candidate's text becomes the answer; attributions missing a
/// URI or title are silently skipped, so no partial source is ever
/// constructed.
fn normalize(response: GenerationResponse) -> Answer {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Answer::failure(EMPTY_RESPONSE_MESSAGE);
    };

    let Some(text) = candidate.text else {
        return Answer::failure(EMPTY_RESPONSE_MESSAGE);
    };

    let sources = candidate
        .attributions
        .into_iter()
        .filter_map(|attribution| match (attribution.uri, attribution.title) {
            (Some(uri), Some(title)) => Some(Source { uri, title }),
            _ => None,
        })
        .collect();

    Answer { text, sources }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Attribution, Candidate};
    use crate::providers::MockClient;
    use grounded_core::AppError;

    fn text_response(text: &str) -> GenerationResponse {
        GenerationResponse {
            candidates: vec![Candidate {
                text: Some(text.to_string()),
                attributions: Vec::new(),
            }],
        }
    }

    fn transport_error() -> AppError {
        AppError::Transport("connection refused".to_string())
    }

    fn service_with(mock: Arc<MockClient>) -> AnswerService {
        AnswerService::new(mock, RetryPolicy::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_attempts_on_persistent_transport_failure() {
        let mock = Arc::new(MockClient::new());
        for _ in 0..5 {
            mock.push(Err(transport_error()));
        }
        let service = service_with(mock.clone());

        let started = tokio::time::Instant::now();
        let answer = service.answer("any question").await;

        assert_eq!(mock.calls(), 5);
        // Four backoff sleeps: 1 + 2 + 4 + 8 seconds of virtual time
        assert_eq!(started.elapsed(), Duration::from_secs(15));
        assert!(answer.text.contains("Error"));
        assert!(answer.sources.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_failures() {
        let mock = Arc::new(MockClient::new());
        mock.push(Err(transport_error()));
        mock.push(Err(transport_error()));
        mock.push(Ok(text_response("recovered")));
        let service = service_with(mock.clone());

        let answer = service.answer("any question").await;

        assert_eq!(mock.calls(), 3);
        assert_eq!(answer.text, "recovered");
    }

    #[tokio::test]
    async fn test_terminal_error_is_not_retried() {
        let mock = Arc::new(MockClient::new());
        mock.push(Err(AppError::Serialization("bad json".to_string())));
        let service = service_with(mock.clone());

        let answer = service.answer("any question").await;

        assert_eq!(mock.calls(), 1);
        assert!(answer.text.contains("unexpected error"));
        assert!(answer.sources.is_empty());
    }

    #[tokio::test]
    async fn test_missing_candidates_yields_fixed_message() {
        let mock = Arc::new(MockClient::new());
        mock.push(Ok(GenerationResponse::default()));
        let service = service_with(mock);

        let answer = service.answer("any question").await;

        assert_eq!(answer.text, EMPTY_RESPONSE_MESSAGE);
        assert!(answer.sources.is_empty());
    }

    #[tokio::test]
    async fn test_candidate_without_text_yields_fixed_message() {
        let mock = Arc::new(MockClient::new());
        mock.push(Ok(GenerationResponse {
            candidates: vec![Candidate::default()],
        }));
        let service = service_with(mock);

        let answer = service.answer("any question").await;

        assert_eq!(answer.text, EMPTY_RESPONSE_MESSAGE);
    }

    #[tokio::test]
    async fn test_partial_attributions_are_skipped() {
        let mock = Arc::new(MockClient::new());
        mock.push(Ok(GenerationResponse {
            candidates: vec![Candidate {
                text: Some("grounded answer".to_string()),
                attributions: vec![
                    Attribution {
                        uri: Some("https://a.example".to_string()),
                        title: Some("A".to_string()),
                    },
                    Attribution {
                        uri: None,
                        title: Some("missing uri".to_string()),
                    },
                ],
            }],
        }));
        let service = service_with(mock);

        let answer = service.answer("any question").await;

        assert_eq!(answer.text, "grounded answer");
        assert_eq!(
            answer.sources,
            vec![Source {
                uri: "https://a.example".to_string(),
                title: "A".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_answer_without_grounding_has_empty_sources() {
        let mock = Arc::new(MockClient::new());
        mock.push(Ok(text_response("ungrounded answer")));
        let service = service_with(mock);

        let answer = service.answer("any question").await;

        assert_eq!(answer.text, "ungrounded answer");
        assert!(answer.sources.is_empty());
    }

    #[test]
    fn test_backoff_schedule_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0), Duration::from_secs(1));
        assert_eq!(policy.delay(1), Duration::from_secs(2));
        assert_eq!(policy.delay(2), Duration::from_secs(4));
        assert_eq!(policy.delay(3), Duration::from_secs(8));
    }
}
