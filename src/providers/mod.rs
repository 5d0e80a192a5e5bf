/*!
 * Provider implementations for transcription services.
 *
 * This module contains client implementations for transcription providers:
 * - Gemini: Google Gemini API with native video understanding
 * - Mock: configurable test double
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

pub mod gemini;
pub mod mock;

pub use gemini::Gemini;
pub use mock::{MockBehavior, MockProvider, WORKING_PAYLOAD};

/// A transcription request: the video to transcribe, as raw bytes
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    /// Raw video file contents
    pub video_data: Vec<u8>,

    /// MIME type of the video data
    pub mime_type: String,
}

impl TranscriptionRequest {
    /// Create a new transcription request
    pub fn new(video_data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        TranscriptionRequest {
            video_data,
            mime_type: mime_type.into(),
        }
    }

    /// Create a request for MP4 video data
    pub fn mp4(video_data: Vec<u8>) -> Self {
        Self::new(video_data, "video/mp4")
    }
}

/// Common trait for all transcription providers
///
/// A provider takes a video and returns the raw text payload of the
/// transcription response. Parsing and normalization of that payload is the
/// normalizer's job, so providers stay thin HTTP clients. Failures are
/// terminal for the attempt; no provider retries automatically.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync + Debug {
    /// Transcribe a video, returning the raw response text
    ///
    /// # Arguments
    /// * `request` - The video to transcribe
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The raw transcription payload or an error
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Short provider name for logging
    fn name(&self) -> &'static str;
}
