/*!
 * Tests for style overlay rendering
 */

use std::str::FromStr;
use autocap::caption_track::CaptionSegment;
use autocap::overlay::{
    karaoke_progress, render, CaptionStyle, FrameContext, OverlayPlacement, KARAOKE_REVEAL_RATE,
};

fn sample_caption() -> CaptionSegment {
    CaptionSegment::new(0.0, 5.0, "Hello world")
}

/// Test that no caption means no overlay
#[test]
fn test_render_withNoCaption_shouldReturnNone() {
    let ctx = FrameContext::new(0, 30.0);
    assert!(render(None, CaptionStyle::BottomCentered, &ctx).is_none());
    assert!(render(None, CaptionStyle::TopBar, &ctx).is_none());
    assert!(render(None, CaptionStyle::Karaoke, &ctx).is_none());
}

/// Test the bottom-centered overlay shape
#[test]
fn test_render_withBottomCentered_shouldProduceSingleLayer() {
    let caption = sample_caption();
    let ctx = FrameContext::new(0, 30.0);
    let spec = render(Some(&caption), CaptionStyle::BottomCentered, &ctx).unwrap();

    assert_eq!(
        spec.placement,
        OverlayPlacement::BottomCentered { offset_px: 80 }
    );
    assert!(spec.backdrop.is_some());
    assert_eq!(spec.layers.len(), 1);
    assert_eq!(spec.layers[0].text, "Hello world");
    assert_eq!(spec.layers[0].color, "#FFFFFF");
    assert_eq!(spec.layers[0].font_size_px, 32);
    assert_eq!(spec.layers[0].font_weight, 700);
    assert!(spec.layers[0].reveal.is_none());
}

/// Test the top-bar overlay shape
#[test]
fn test_render_withTopBar_shouldProduceBarOverlay() {
    let caption = sample_caption();
    let ctx = FrameContext::new(0, 30.0);
    let spec = render(Some(&caption), CaptionStyle::TopBar, &ctx).unwrap();

    assert_eq!(spec.placement, OverlayPlacement::TopBar);
    assert!(spec.backdrop.is_some());
    assert_eq!(spec.layers.len(), 1);
    assert_eq!(spec.layers[0].font_size_px, 28);
    assert_eq!(spec.layers[0].font_weight, 600);
}

/// Test the karaoke two-layer overlay shape
#[test]
fn test_render_withKaraoke_shouldProduceBaseAndRevealLayers() {
    let caption = sample_caption();
    let ctx = FrameContext::new(30, 30.0);
    let spec = render(Some(&caption), CaptionStyle::Karaoke, &ctx).unwrap();

    assert_eq!(
        spec.placement,
        OverlayPlacement::BottomCentered { offset_px: 100 }
    );
    assert!(spec.backdrop.is_none());
    assert_eq!(spec.layers.len(), 2);

    let base = &spec.layers[0];
    assert_eq!(base.color, "#888888");
    assert!(base.reveal.is_none());

    let highlight = &spec.layers[1];
    assert_eq!(highlight.color, "#FFD700");
    // One second of playback at rate 0.5
    assert_eq!(highlight.reveal, Some(0.5));
}

/// Test that karaoke progress is clocked from playback start, not the
/// caption's own start
#[test]
fn test_karaoke_progress_withLateCaption_shouldUseGlobalClock() {
    // Frame 300 at 30 fps is 10s of playback; progress is long since clamped
    let ctx = FrameContext::new(300, 30.0);
    assert_eq!(karaoke_progress(&ctx), 1.0);
}

/// Property: progress is monotonically non-decreasing in frame for fixed fps
#[test]
fn test_karaoke_progress_withIncreasingFrames_shouldNeverDecrease() {
    let mut previous = 0.0;
    for frame in 0..240 {
        let progress = karaoke_progress(&FrameContext::new(frame, 30.0));
        assert!(progress >= previous);
        previous = progress;
    }
}

/// Property: progress reaches exactly 1 at frame / fps == 2 and never exceeds it
#[test]
fn test_karaoke_progress_withTwoSecondsElapsed_shouldReachFullReveal() {
    // 2 seconds of playback at rate 0.5 is exactly full reveal
    assert_eq!(karaoke_progress(&FrameContext::new(60, 30.0)), 1.0);
    assert_eq!(karaoke_progress(&FrameContext::new(120, 60.0)), 1.0);

    assert!(karaoke_progress(&FrameContext::new(59, 30.0)) < 1.0);
    assert_eq!(karaoke_progress(&FrameContext::new(100_000, 30.0)), 1.0);
}

/// Test the reveal rate constant is the compatibility value
#[test]
fn test_karaoke_reveal_rate_shouldMatchLegacyConstant() {
    assert_eq!(KARAOKE_REVEAL_RATE, 0.5);
}

/// Test renderer purity: identical input yields identical output
#[test]
fn test_render_withIdenticalInput_shouldBeIdentical() {
    let caption = sample_caption();
    let ctx = FrameContext::new(42, 30.0);

    for style in [
        CaptionStyle::BottomCentered,
        CaptionStyle::TopBar,
        CaptionStyle::Karaoke,
    ] {
        let first = render(Some(&caption), style, &ctx);
        let second = render(Some(&caption), style, &ctx);
        assert_eq!(first, second);
    }
}

/// Test style parsing and display round trips
#[test]
fn test_caption_style_withStringForms_shouldRoundTrip() {
    for style in [
        CaptionStyle::BottomCentered,
        CaptionStyle::TopBar,
        CaptionStyle::Karaoke,
    ] {
        let parsed = CaptionStyle::from_str(&style.to_string()).unwrap();
        assert_eq!(parsed, style);
    }

    assert_eq!(
        CaptionStyle::from_str("karaoke").unwrap(),
        CaptionStyle::Karaoke
    );
    assert!(CaptionStyle::from_str("subtitle").is_err());
}

/// Test style serde uses kebab-case identifiers
#[test]
fn test_caption_style_withSerde_shouldUseKebabCase() {
    assert_eq!(
        serde_json::to_string(&CaptionStyle::BottomCentered).unwrap(),
        "\"bottom-centered\""
    );
    let parsed: CaptionStyle = serde_json::from_str("\"top-bar\"").unwrap();
    assert_eq!(parsed, CaptionStyle::TopBar);
}

/// Test the default style
#[test]
fn test_caption_style_default_shouldBeBottomCentered() {
    assert_eq!(CaptionStyle::default(), CaptionStyle::BottomCentered);
}

/// Test frame context time computation
#[test]
fn test_frame_context_time_withThirtyFps_shouldConvert() {
    assert_eq!(FrameContext::new(45, 30.0).time(), 1.5);
}
