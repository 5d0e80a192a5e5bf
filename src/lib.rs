/*!
 * # autocap - AI Video Captioning
 *
 * A Rust library for generating and rendering time-coded video captions
 * from automatic transcription.
 *
 * ## Features
 *
 * - Transcribe video audio via the Gemini API (video inlined as base64)
 * - Normalize noisy transcription output into a validated caption track
 * - Resolve the active caption for any playback instant
 * - Render per-frame caption overlays in three styles:
 *   - Bottom-centered
 *   - Top bar
 *   - Karaoke (progressive color reveal)
 * - Export caption tracks as SRT
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `caption_track`: Caption segment and track data model, SRT export
 * - `normalizer`: Validation and coercion of raw transcription candidates
 * - `timeline`: Active-caption resolution for a playback instant
 * - `overlay`: Per-frame overlay rendering for each caption style
 * - `session`: Playback session state owned by the host application
 * - `transcription_service`: Orchestration of one transcription attempt
 * - `providers`: Client implementations for transcription providers:
 *   - `providers::gemini`: Gemini API client
 *   - `providers::mock`: Configurable test double
 * - `video_probe`: ffprobe-based video metadata probing
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod caption_track;
pub mod errors;
pub mod normalizer;
pub mod overlay;
pub mod providers;
pub mod session;
pub mod timeline;
pub mod transcription_service;
pub mod video_probe;

// Re-export main types for easier usage
pub use app_config::Config;
pub use caption_track::{CaptionSegment, CaptionTrack};
pub use errors::{AppError, CaptionError, ProviderError};
pub use normalizer::{normalize, parse_transcription_payload, RawCaptionCandidate};
pub use overlay::{CaptionStyle, FrameContext, OverlaySpec};
pub use session::PlaybackSession;
pub use transcription_service::TranscriptionService;
