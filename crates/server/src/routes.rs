//! HTTP routes for the Grounded Q&A service.
//!
//! One page, one endpoint. The handler validates the question, forwards
//! it to the answer service, and relays the normalized result; it has no
//! error path of its own because the service never fails.

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use grounded_llm::{AnswerService, Source};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Build the application router over a shared answer service.
pub fn router(service: Arc<AnswerService>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ask", post(ask))
        .with_state(service)
}

/// Serve the embedded question page.
async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

#[derive(Debug, Deserialize)]
struct AskRequest {
    /// Missing key is treated like an empty question
    #[serde(default)]
    question: String,
}

#[derive(Debug, Serialize)]
struct AskResponse {
    answer: String,
    sources: Vec<Source>,
}

/// Handle a question submission.
async fn ask(
    State(service): State<Arc<AnswerService>>,
    Json(payload): Json<AskRequest>,
) -> (StatusCode, Json<AskResponse>) {
    let question = payload.question.trim();

    if question.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AskResponse {
                answer: "Please provide a question.".to_string(),
                sources: Vec::new(),
            }),
        );
    }

    tracing::info!("Answering question ({} chars)", question.len());

    let answer = service.answer(question).await;

    (
        StatusCode::OK,
        Json(AskResponse {
            answer: answer.text,
            sources: answer.sources,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use grounded_llm::{Attribution, Candidate, GenerationResponse, MockClient, RetryPolicy};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router(mock: Arc<MockClient>) -> Router {
        let service = AnswerService::new(mock, RetryPolicy::default());
        router(Arc::new(service))
    }

    async fn post_ask(app: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ask")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_blank_question_is_rejected() {
        let app = test_router(Arc::new(MockClient::new()));

        let (status, body) = post_ask(app, serde_json::json!({"question": "  "})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({"answer": "Please provide a question.", "sources": []})
        );
    }

    #[tokio::test]
    async fn test_missing_question_key_is_rejected() {
        let app = test_router(Arc::new(MockClient::new()));

        let (status, _body) = post_ask(app, serde_json::json!({"unrelated": true})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_question_is_answered_with_sources() {
        let mock = Arc::new(MockClient::new());
        mock.push(Ok(GenerationResponse {
            candidates: vec![Candidate {
                text: Some("42".to_string()),
                attributions: vec![Attribution {
                    uri: Some("https://a.example".to_string()),
                    title: Some("A".to_string()),
                }],
            }],
        }));
        let app = test_router(mock);

        let (status, body) =
            post_ask(app, serde_json::json!({"question": "what is the answer?"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "answer": "42",
                "sources": [{"uri": "https://a.example", "title": "A"}]
            })
        );
    }

    #[tokio::test]
    async fn test_index_serves_html() {
        let app = test_router(Arc::new(MockClient::new()));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("<html"));
    }
}
