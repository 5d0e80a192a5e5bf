use std::time::Duration;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::{TranscriptionProvider, TranscriptionRequest};

/// Prompt sent alongside the video. The model is asked for a bare JSON
/// array of `{start, end, text}` objects, though in practice it sometimes
/// wraps the array in code fences anyway.
const TRANSCRIPTION_PROMPT: &str = "Transcribe the audio from this video with timestamps. \
For each sentence or phrase, provide the start time in seconds and the text. \
Support both Hindi (Devanagari) and English. \
Format your response as JSON array with objects containing 'start' (number in seconds), \
'end' (number in seconds), and 'text' (string). \
Keep each caption segment short (5-8 words max). \
Example format: [{\"start\": 0, \"end\": 2.5, \"text\": \"Hello world\"}, \
{\"start\": 2.5, \"end\": 5.0, \"text\": \"This is a test\"}]. \
ONLY return the JSON array, no other text.";

/// Gemini client for interacting with the Google Generative Language API
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Model to use for transcription
    model: String,
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
struct GeminiRequest {
    /// The content blocks of the request
    contents: Vec<GeminiContent>,

    /// Generation parameters
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

/// A content block holding one or more parts
#[derive(Debug, Serialize)]
struct GeminiContent {
    /// The parts of this content block
    parts: Vec<GeminiPart>,
}

/// A single part: either text or inline binary data
#[derive(Debug, Serialize)]
struct GeminiPart {
    /// Text content
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,

    /// Inline binary data (base64)
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

/// Inline binary payload
#[derive(Debug, Serialize)]
struct InlineData {
    /// MIME type of the data
    mime_type: String,

    /// Base64-encoded bytes
    data: String,
}

/// Generation parameters
#[derive(Debug, Serialize)]
struct GenerationConfig {
    /// Sampling temperature; kept low for deterministic timestamps
    temperature: f32,

    /// Maximum number of tokens to generate
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// Gemini response
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    /// Error payload reported by the provider
    error: Option<GeminiError>,

    /// Response candidates
    candidates: Option<Vec<GeminiCandidate>>,
}

/// Provider-reported error payload
#[derive(Debug, Deserialize)]
struct GeminiError {
    /// Error code, usually mirroring the HTTP status
    code: Option<u16>,

    /// Human-readable error message
    message: Option<String>,
}

/// A single response candidate
#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    /// The content of the candidate
    content: GeminiResponseContent,
}

/// Content of a response candidate
#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    /// The parts of the content
    parts: Vec<GeminiResponsePart>,
}

/// A single part of a response candidate
#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    /// Text content, if this part carries text
    text: Option<String>,
}

impl Gemini {
    /// Default public API endpoint
    pub const DEFAULT_ENDPOINT: &'static str = "https://generativelanguage.googleapis.com/v1beta";

    /// Create a new Gemini client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    fn base_url(&self) -> String {
        if self.endpoint.is_empty() {
            Self::DEFAULT_ENDPOINT.to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        }
    }

    fn build_request(&self, request: &TranscriptionRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![
                    GeminiPart {
                        text: Some(TRANSCRIPTION_PROMPT.to_string()),
                        inline_data: None,
                    },
                    GeminiPart {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: request.mime_type.clone(),
                            data: BASE64.encode(&request.video_data),
                        }),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.1,
                max_output_tokens: 8192,
            },
        }
    }

    /// Extract the transcription text from a response
    fn extract_text_from_response(response: &GeminiResponse) -> Result<String, ProviderError> {
        let candidates = response.candidates.as_deref().unwrap_or_default();
        let first = candidates.first().ok_or_else(|| {
            ProviderError::ParseError("No transcription generated".to_string())
        })?;

        first
            .content
            .parts
            .iter()
            .find_map(|part| part.text.clone())
            .ok_or_else(|| {
                ProviderError::ParseError("Response candidate contained no text part".to_string())
            })
    }
}

#[async_trait]
impl TranscriptionProvider for Gemini {
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::AuthenticationError(
                "Gemini API key is required".to_string(),
            ));
        }

        let api_url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url(),
            self.model,
            self.api_key
        );

        debug!(
            "Sending {} bytes of {} to Gemini model {}",
            request.video_data.len(),
            request.mime_type,
            self.model
        );

        let body = self.build_request(&request);

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());

            // Surface the provider's own message verbatim when the error
            // body carries one
            let message = serde_json::from_str::<GeminiResponse>(&error_text)
                .ok()
                .and_then(|r| r.error)
                .and_then(|e| e.message)
                .unwrap_or(error_text);

            error!("Gemini API error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let gemini_response = response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if let Some(err) = gemini_response.error {
            let message = err.message.unwrap_or_else(|| "Unknown error".to_string());
            error!("Gemini reported an error: {}", message);
            return Err(ProviderError::ApiError {
                status_code: err.code.unwrap_or(status.as_u16()),
                message,
            });
        }

        Self::extract_text_from_response(&gemini_response)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::AuthenticationError(
                "Gemini API key is required".to_string(),
            ));
        }

        let api_url = format!(
            "{}/models/{}?key={}",
            self.base_url(),
            self.model,
            self.api_key
        );

        let response = self
            .client
            .get(&api_url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
