/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with a valid caption payload
 * - `MockProvider::fenced()` - Succeeds, payload wrapped in Markdown fences
 * - `MockProvider::malformed()` - Succeeds with a non-JSON payload
 * - `MockProvider::empty()` - Succeeds with an empty caption list
 * - `MockProvider::failing()` - Always fails with an API error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::{TranscriptionProvider, TranscriptionRequest};

/// Canonical well-formed payload used by the working behaviors
pub const WORKING_PAYLOAD: &str = r#"[{"start": 0, "end": 2.5, "text": "Hello world"}, {"start": 2.5, "end": 5.0, "text": "This is a test"}]"#;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a well-formed caption payload
    Working,
    /// Succeeds but wraps the payload in Markdown code fences
    Fenced,
    /// Succeeds with prose instead of JSON
    Malformed,
    /// Succeeds with an empty caption list
    Empty,
    /// Always fails with an API error
    Failing,
    /// Returns a fixed custom payload
    Fixed(String),
}

/// Mock provider for testing transcription behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of transcribe calls made
    request_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        MockProvider {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A provider that always succeeds with a valid payload
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// A provider whose payload is wrapped in code fences
    pub fn fenced() -> Self {
        Self::new(MockBehavior::Fenced)
    }

    /// A provider that returns prose instead of JSON
    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    /// A provider that returns an empty caption list
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// A provider that always fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// A provider that returns the given payload verbatim
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fixed(payload.into()))
    }

    /// Number of transcribe calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptionProvider for MockProvider {
    async fn transcribe(&self, _request: TranscriptionRequest) -> Result<String, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Working => Ok(WORKING_PAYLOAD.to_string()),
            MockBehavior::Fenced => Ok(format!("```json\n{}\n```", WORKING_PAYLOAD)),
            MockBehavior::Malformed => {
                Ok("The audio could not be transcribed reliably.".to_string())
            }
            MockBehavior::Empty => Ok("[]".to_string()),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 400,
                message: "API key not valid. Please pass a valid API key.".to_string(),
            }),
            MockBehavior::Fixed(payload) => Ok(payload.clone()),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 400,
                message: "API key not valid. Please pass a valid API key.".to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
