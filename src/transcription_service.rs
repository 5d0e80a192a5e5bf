use std::path::Path;
use log::{debug, info};

use crate::app_config::ProviderConfig;
use crate::caption_track::CaptionTrack;
use crate::errors::AppError;
use crate::normalizer;
use crate::providers::{Gemini, TranscriptionProvider, TranscriptionRequest};
use crate::video_probe;

// @module: Transcription orchestration

/// Orchestrates one transcription attempt: send the video to the provider,
/// parse the returned payload, and normalize it into a caption track.
///
/// Every failure along the way is terminal for the attempt; no partial or
/// degraded track is ever produced. The caller owns superseding semantics:
/// a later upload simply replaces whatever track an earlier attempt made.
#[derive(Debug)]
pub struct TranscriptionService {
    /// The provider used for transcription calls
    provider: Box<dyn TranscriptionProvider>,
}

impl TranscriptionService {
    /// Create a service backed by the Gemini provider from configuration
    pub fn new(config: &ProviderConfig) -> Self {
        let provider = Gemini::new(
            config.api_key.clone(),
            config.endpoint.clone(),
            config.model.clone(),
            config.timeout_secs,
        );
        Self::with_provider(Box::new(provider))
    }

    /// Create a service with an explicit provider - used by tests
    pub fn with_provider(provider: Box<dyn TranscriptionProvider>) -> Self {
        TranscriptionService { provider }
    }

    /// Generate a caption track for a video file.
    ///
    /// Reads the file, sends it to the provider, and normalizes the
    /// response. Only MP4 input is accepted at this boundary.
    pub async fn generate_captions<P: AsRef<Path>>(
        &self,
        video_path: P,
    ) -> Result<CaptionTrack, AppError> {
        let video_path = video_path.as_ref();

        if !video_path.exists() {
            return Err(AppError::File(format!(
                "Video file does not exist: {}",
                video_path.display()
            )));
        }

        if !video_probe::is_mp4(video_path) {
            return Err(AppError::File(format!(
                "Unsupported video format, expected an MP4 file: {}",
                video_path.display()
            )));
        }

        let video_data = std::fs::read(video_path)?;
        debug!(
            "Read {} bytes from {}, sending to {} provider",
            video_data.len(),
            video_path.display(),
            self.provider.name()
        );

        let payload = self
            .provider
            .transcribe(TranscriptionRequest::mp4(video_data))
            .await?;

        let track = self.captions_from_payload(&payload)?;
        info!(
            "Generated {} caption segments for {}",
            track.len(),
            video_path.display()
        );

        Ok(track)
    }

    /// Normalize a raw transcription payload into a caption track
    pub fn captions_from_payload(&self, payload: &str) -> Result<CaptionTrack, AppError> {
        let candidates = normalizer::parse_transcription_payload(payload)?;
        debug!("Parsed {} raw caption candidates", candidates.len());
        Ok(normalizer::normalize(&candidates)?)
    }

    /// Test the connection to the underlying provider
    pub async fn test_connection(&self) -> Result<(), AppError> {
        Ok(self.provider.test_connection().await?)
    }
}
