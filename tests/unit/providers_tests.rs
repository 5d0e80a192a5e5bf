/*!
 * Tests for provider implementations
 */

use autocap::errors::ProviderError;
use autocap::providers::{
    Gemini, MockProvider, TranscriptionProvider, TranscriptionRequest, WORKING_PAYLOAD,
};
use autocap::normalizer::normalize_payload;

fn dummy_request() -> TranscriptionRequest {
    TranscriptionRequest::mp4(vec![1, 2, 3, 4])
}

/// Test request constructors
#[test]
fn test_transcription_request_mp4_shouldSetMimeType() {
    let request = TranscriptionRequest::mp4(vec![0u8; 8]);
    assert_eq!(request.mime_type, "video/mp4");
    assert_eq!(request.video_data.len(), 8);

    let custom = TranscriptionRequest::new(vec![], "video/webm");
    assert_eq!(custom.mime_type, "video/webm");
}

/// Test that the working mock payload normalizes into the canonical track
#[tokio::test]
async fn test_mock_working_withNormalization_shouldProduceTwoSegments() {
    let provider = MockProvider::working();
    let payload = provider.transcribe(dummy_request()).await.unwrap();

    let track = normalize_payload(&payload).unwrap();
    assert_eq!(track.len(), 2);
    assert_eq!(track.segments()[0].text, "Hello world");
    assert_eq!(track.segments()[1].start, 2.5);
}

/// Test that the fenced mock payload survives fence stripping
#[tokio::test]
async fn test_mock_fenced_withNormalization_shouldProduceTrack() {
    let provider = MockProvider::fenced();
    let payload = provider.transcribe(dummy_request()).await.unwrap();

    assert!(payload.starts_with("```"));
    let track = normalize_payload(&payload).unwrap();
    assert_eq!(track.len(), 2);
}

/// Test that the failing mock surfaces the provider's message verbatim
#[tokio::test]
async fn test_mock_failing_shouldSurfaceProviderMessage() {
    let provider = MockProvider::failing();
    let err = provider.transcribe(dummy_request()).await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("400"));
    assert!(message.contains("API key not valid"));
}

/// Test mock connection testing
#[test]
fn test_mock_test_connection_shouldMatchBehavior() {
    let healthy = tokio_test::block_on(MockProvider::working().test_connection());
    assert!(healthy.is_ok());

    let broken = tokio_test::block_on(MockProvider::failing().test_connection());
    assert!(broken.is_err());
}

/// Test the canonical payload constant stays parseable
#[test]
fn test_working_payload_shouldBeWellFormed() {
    let track = normalize_payload(WORKING_PAYLOAD).unwrap();
    assert_eq!(track.len(), 2);
    assert_eq!(track.segments()[1].end, 5.0);
}

/// Test that the Gemini client refuses to transcribe without an API key
/// (no network call is made)
#[tokio::test]
async fn test_gemini_transcribe_withEmptyApiKey_shouldFailAuthentication() {
    let provider = Gemini::new("", "", "gemini-2.5-flash-lite", 30);
    let err = provider.transcribe(dummy_request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::AuthenticationError(_)));
}

/// Test that connection testing also requires an API key
#[tokio::test]
async fn test_gemini_test_connection_withEmptyApiKey_shouldFailAuthentication() {
    let provider = Gemini::new("", "", "gemini-2.5-flash-lite", 30);
    let err = provider.test_connection().await.unwrap_err();
    assert!(matches!(err, ProviderError::AuthenticationError(_)));
}

/// Test provider names
#[test]
fn test_provider_names_shouldIdentifyImplementations() {
    assert_eq!(MockProvider::working().name(), "mock");
    assert_eq!(Gemini::new("k", "", "m", 30).name(), "gemini");
}
