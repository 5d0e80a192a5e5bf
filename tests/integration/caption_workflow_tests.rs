/*!
 * End-to-end caption generation tests using mock providers
 */

use anyhow::Result;
use autocap::errors::{AppError, CaptionError};
use autocap::overlay::CaptionStyle;
use autocap::providers::MockProvider;
use autocap::session::PlaybackSession;
use autocap::transcription_service::TranscriptionService;
use crate::common;

/// Test the full workflow: video file in, caption track and SRT out
#[tokio::test]
async fn test_workflow_withWorkingProvider_shouldProduceTrackAndSrt() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let video_path = common::create_dummy_video(&temp_dir.path().to_path_buf(), "clip.mp4")?;

    let service = TranscriptionService::with_provider(Box::new(MockProvider::working()));
    let track = service.generate_captions(&video_path).await.unwrap();

    assert_eq!(track.len(), 2);
    assert_eq!(track.segments()[0].text, "Hello world");

    let srt_path = temp_dir.path().join("clip.srt");
    track.write_to_srt(&srt_path)?;
    let srt = std::fs::read_to_string(&srt_path)?;
    assert!(srt.contains("00:00:02,500 --> 00:00:05,000"));
    Ok(())
}

/// Test that a fenced provider response still normalizes
#[tokio::test]
async fn test_workflow_withFencedResponse_shouldProduceTrack() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video_path = common::create_dummy_video(&temp_dir.path().to_path_buf(), "clip.mp4")?;

    let service = TranscriptionService::with_provider(Box::new(MockProvider::fenced()));
    let track = service.generate_captions(&video_path).await.unwrap();
    assert_eq!(track.len(), 2);
    Ok(())
}

/// Test that a provider failure surfaces as a provider error
#[tokio::test]
async fn test_workflow_withFailingProvider_shouldSurfaceProviderError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video_path = common::create_dummy_video(&temp_dir.path().to_path_buf(), "clip.mp4")?;

    let service = TranscriptionService::with_provider(Box::new(MockProvider::failing()));
    let err = service.generate_captions(&video_path).await.unwrap_err();

    assert!(matches!(err, AppError::Provider(_)));
    assert!(err.to_string().contains("API key not valid"));
    Ok(())
}

/// Test that a prose response fails as malformed input with no partial track
#[tokio::test]
async fn test_workflow_withMalformedResponse_shouldFailMalformed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video_path = common::create_dummy_video(&temp_dir.path().to_path_buf(), "clip.mp4")?;

    let service = TranscriptionService::with_provider(Box::new(MockProvider::malformed()));
    let err = service.generate_captions(&video_path).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Caption(CaptionError::MalformedInput(_))
    ));
    Ok(())
}

/// Test that an empty caption list fails as an empty result
#[tokio::test]
async fn test_workflow_withEmptyResponse_shouldFailEmptyResult() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video_path = common::create_dummy_video(&temp_dir.path().to_path_buf(), "clip.mp4")?;

    let service = TranscriptionService::with_provider(Box::new(MockProvider::empty()));
    let err = service.generate_captions(&video_path).await.unwrap_err();
    assert!(matches!(err, AppError::Caption(CaptionError::EmptyResult)));
    Ok(())
}

/// Test that a missing video file is rejected before any provider call
#[tokio::test]
async fn test_workflow_withMissingVideo_shouldFailFileError() {
    let service = TranscriptionService::with_provider(Box::new(MockProvider::working()));
    let err = service
        .generate_captions("/nonexistent/clip.mp4")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::File(_)));
}

/// Test that non-MP4 input is rejected at the boundary
#[tokio::test]
async fn test_workflow_withNonMp4Input_shouldFailFileError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video_path =
        common::create_test_file(&temp_dir.path().to_path_buf(), "clip.mkv", "data")?;

    let service = TranscriptionService::with_provider(Box::new(MockProvider::working()));
    let err = service.generate_captions(&video_path).await.unwrap_err();
    assert!(matches!(err, AppError::File(_)));
    Ok(())
}

/// Test driving a playback session from a generated track
#[tokio::test]
async fn test_workflow_withSession_shouldRenderOverlaysPerFrame() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video_path = common::create_dummy_video(&temp_dir.path().to_path_buf(), "clip.mp4")?;

    let service = TranscriptionService::with_provider(Box::new(MockProvider::working()));
    let track = service.generate_captions(&video_path).await.unwrap();

    let mut session = PlaybackSession::new(30.0);
    session.load_video(&video_path);
    session.set_style(CaptionStyle::Karaoke);
    session.set_track(track);

    // Frame 0 is inside the first caption
    let spec = session.overlay_at_frame(0).unwrap();
    assert_eq!(spec.layers[0].text, "Hello world");

    // Frame 75 (2.5s) is the boundary; the second caption wins
    let spec = session.overlay_at_frame(75).unwrap();
    assert_eq!(spec.layers[0].text, "This is a test");

    // Frame 150 (5.0s) is past the last caption
    assert!(session.overlay_at_frame(150).is_none());
    Ok(())
}

/// Test the offline overlay timeline export
#[tokio::test]
async fn test_workflow_withOverlayTimeline_shouldBePureAndOrdered() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video_path = common::create_dummy_video(&temp_dir.path().to_path_buf(), "clip.mp4")?;

    let service = TranscriptionService::with_provider(Box::new(MockProvider::working()));
    let track = service.generate_captions(&video_path).await.unwrap();

    let mut session = PlaybackSession::new(30.0);
    session.set_style(CaptionStyle::Karaoke);
    session.set_track(track);

    // Captions cover [0, 5); at 30 fps that is frames 0..150 of a 6s clip
    let timeline = session.overlay_timeline(180);
    assert_eq!(timeline.len(), 150);
    assert_eq!(timeline.first().unwrap().frame, 0);
    assert_eq!(timeline.last().unwrap().frame, 149);

    // Rendering the same timeline again yields identical output
    assert_eq!(session.overlay_timeline(180), timeline);

    // Karaoke reveal is non-decreasing across the dump
    let mut previous = 0.0;
    for entry in &timeline {
        let reveal = entry.overlay.layers[1].reveal.unwrap();
        assert!(reveal >= previous);
        previous = reveal;
    }
    Ok(())
}

/// Test that a new transcription replaces the previous track wholesale
#[tokio::test]
async fn test_workflow_withSecondTranscription_shouldReplaceTrack() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video_path = common::create_dummy_video(&temp_dir.path().to_path_buf(), "clip.mp4")?;

    let mut session = PlaybackSession::new(30.0);
    session.load_video(&video_path);

    let service = TranscriptionService::with_provider(Box::new(MockProvider::working()));
    session.set_track(service.generate_captions(&video_path).await.unwrap());
    assert_eq!(session.track().unwrap().len(), 2);

    let single = TranscriptionService::with_provider(Box::new(MockProvider::with_payload(
        r#"[{"start": 0, "end": 1, "text": "replacement"}]"#,
    )));
    session.set_track(single.generate_captions(&video_path).await.unwrap());

    assert_eq!(session.track().unwrap().len(), 1);
    assert_eq!(session.track().unwrap().segments()[0].text, "replacement");
    Ok(())
}
