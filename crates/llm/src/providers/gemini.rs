//! Gemini model provider implementation.
//!
//! This module integrates with the Gemini `generateContent` REST API,
//! including its Google Search grounding tool.
//! API: https://ai.google.dev/api/generate-content

use crate::client::{Attribution, Candidate, GenerationRequest, GenerationResponse, ModelClient};
use grounded_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini API request format.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![GeminiPart { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

/// Tool declaration enabling Google Search grounding.
#[derive(Debug, Serialize)]
struct GeminiTool {
    google_search: GoogleSearch,
}

/// Serializes to the empty object the API expects.
#[derive(Debug, Serialize)]
struct GoogleSearch {}

/// Gemini API response format.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingAttributions", default)]
    grounding_attributions: Vec<GroundingAttribution>,
}

#[derive(Debug, Deserialize)]
struct GroundingAttribution {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

/// Gemini model client.
pub struct GeminiClient {
    /// Base URL for the Gemini API
    api_base: String,

    /// Model identifier
    model: String,

    /// API credential, sent as the `key` query parameter
    api_key: String,

    /// HTTP client with the per-attempt timeout applied
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// The timeout bounds each individual attempt; retrying across
    /// attempts is the answer service's concern.
    pub fn new(
        api_base: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Model(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_base: api_base.into(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        })
    }

    fn endpoint_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Convert GenerationRequest to Gemini format.
    fn to_gemini_request(&self, request: &GenerationRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent::from_text(&request.prompt)],
            tools: if request.web_search {
                vec![GeminiTool {
                    google_search: GoogleSearch {},
                }]
            } else {
                Vec::new()
            },
            system_instruction: request
                .system
                .as_deref()
                .map(GeminiContent::from_text),
        }
    }
}

/// Convert a Gemini response to the provider-agnostic shape.
fn convert_response(response: GeminiResponse) -> GenerationResponse {
    let candidates = response
        .candidates
        .into_iter()
        .map(|candidate| {
            let text = candidate
                .content
                .and_then(|content| content.parts.into_iter().next())
                .map(|part| part.text);

            let attributions = candidate
                .grounding_metadata
                .map(|metadata| {
                    metadata
                        .grounding_attributions
                        .into_iter()
                        .filter_map(|attribution| attribution.web)
                        .map(|web| Attribution {
                            uri: web.uri,
                            title: web.title,
                        })
                        .collect()
                })
                .unwrap_or_default();

            Candidate { text, attributions }
        })
        .collect();

    GenerationResponse { candidates }
}

#[async_trait::async_trait]
impl ModelClient for GeminiClient {
    fn provider_name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> AppResult<GenerationResponse> {
        tracing::debug!("Sending generation request to Gemini");

        let gemini_request = self.to_gemini_request(request);
        let url = self.endpoint_url();

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to send request to Gemini: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Transport(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::Serialization(format!("Failed to parse Gemini response: {}", e)))?;

        tracing::debug!("Received generation response from Gemini");

        Ok(convert_response(gemini_response))
    }
}
