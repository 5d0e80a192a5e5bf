/*!
 * Style overlay rendering.
 *
 * Given the active caption (if any) and the selected style, produce the
 * rendering instructions for one frame. All style handlers are pure
 * functions of their inputs, so re-rendering a frame or rendering frames
 * out of order (offline export) produces identical output.
 */

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::caption_track::CaptionSegment;

/// Karaoke reveal speed, in reveal-units per second of playback time.
///
/// The reveal is clocked from the start of playback, not from the caption's
/// own start, so it saturates after `1 / KARAOKE_REVEAL_RATE` seconds of
/// global playback regardless of which caption is showing. Kept for output
/// compatibility with the legacy renderer; a per-caption variant can replace
/// [`karaoke_progress`] without touching the dispatch.
pub const KARAOKE_REVEAL_RATE: f64 = 0.5;

const TEXT_WHITE: &str = "#FFFFFF";
const KARAOKE_BASE_COLOR: &str = "#888888";
const KARAOKE_HIGHLIGHT_COLOR: &str = "#FFD700";

const BOTTOM_CENTERED_OFFSET_PX: u32 = 80;
const KARAOKE_OFFSET_PX: u32 = 100;

/// Caption style, a closed set of variants selected by the UI layer.
///
/// The engine never changes the selected style itself; adding a fourth
/// style is a local, additive change here and in [`render`].
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionStyle {
    // @style: Centered box near the bottom edge
    #[default]
    BottomCentered,
    // @style: Full-width bar across the top
    TopBar,
    // @style: Progressive color reveal over dimmed base text
    Karaoke,
}

impl CaptionStyle {
    // @returns: Human-readable style name
    pub fn display_name(&self) -> &str {
        match self {
            Self::BottomCentered => "Bottom Centered",
            Self::TopBar => "Top Bar",
            Self::Karaoke => "Karaoke",
        }
    }

    // @returns: Lowercase style identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::BottomCentered => "bottom-centered".to_string(),
            Self::TopBar => "top-bar".to_string(),
            Self::Karaoke => "karaoke".to_string(),
        }
    }
}

impl std::fmt::Display for CaptionStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for CaptionStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bottom-centered" => Ok(Self::BottomCentered),
            "top-bar" => Ok(Self::TopBar),
            "karaoke" => Ok(Self::Karaoke),
            _ => Err(anyhow!("Invalid caption style: {}", s)),
        }
    }
}

/// Per-tick frame context supplied by the playback driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Frame index, counted from the start of playback
    pub frame: u64,
    /// Frames per second of the playback clock, positive
    pub fps: f64,
}

impl FrameContext {
    /// Create a new frame context
    pub fn new(frame: u64, fps: f64) -> Self {
        FrameContext { frame, fps }
    }

    /// Playback time in seconds for this frame
    pub fn time(&self) -> f64 {
        crate::timeline::time_at_frame(self.frame, self.fps)
    }
}

/// Where an overlay is anchored on the video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "anchor")]
pub enum OverlayPlacement {
    /// Horizontally centered, offset up from the bottom edge
    BottomCentered {
        /// Distance from the bottom edge in pixels
        offset_px: u32,
    },
    /// Full-width bar flush with the top edge
    TopBar,
}

/// Backdrop drawn behind the text layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Backdrop {
    /// CSS-style background color
    pub color: &'static str,
    /// Corner rounding in pixels
    pub corner_radius_px: u32,
}

/// One layer of styled text within an overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLayer {
    /// The caption text
    pub text: String,
    /// Text color
    pub color: &'static str,
    /// Font size in pixels
    pub font_size_px: u32,
    /// CSS font weight
    pub font_weight: u32,
    /// Visible width fraction (0-1) for progressive reveal; `None` means
    /// the layer is fully visible
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal: Option<f64>,
}

/// Rendering instructions for one frame's caption overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlaySpec {
    /// Anchoring of the overlay
    pub placement: OverlayPlacement,
    /// Backdrop behind the text, if the style draws one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<Backdrop>,
    /// Text layers, drawn in order
    pub layers: Vec<TextLayer>,
}

/// Karaoke reveal progress for a frame.
///
/// `min((frame / fps) * KARAOKE_REVEAL_RATE, 1)` - a fixed global rate
/// clamped at full reveal, measured from playback start.
pub fn karaoke_progress(ctx: &FrameContext) -> f64 {
    (ctx.time() * KARAOKE_REVEAL_RATE).min(1.0)
}

/// Produce the overlay for one frame.
///
/// No active caption means no overlay, which is a valid result rather than
/// an error. The function is pure: identical input yields identical output.
pub fn render(
    caption: Option<&CaptionSegment>,
    style: CaptionStyle,
    ctx: &FrameContext,
) -> Option<OverlaySpec> {
    let caption = caption?;

    let spec = match style {
        CaptionStyle::BottomCentered => bottom_centered(&caption.text),
        CaptionStyle::TopBar => top_bar(&caption.text),
        CaptionStyle::Karaoke => karaoke(&caption.text, ctx),
    };

    Some(spec)
}

fn bottom_centered(text: &str) -> OverlaySpec {
    OverlaySpec {
        placement: OverlayPlacement::BottomCentered {
            offset_px: BOTTOM_CENTERED_OFFSET_PX,
        },
        backdrop: Some(Backdrop {
            color: "rgba(0, 0, 0, 0.8)",
            corner_radius_px: 8,
        }),
        layers: vec![TextLayer {
            text: text.to_string(),
            color: TEXT_WHITE,
            font_size_px: 32,
            font_weight: 700,
            reveal: None,
        }],
    }
}

fn top_bar(text: &str) -> OverlaySpec {
    OverlaySpec {
        placement: OverlayPlacement::TopBar,
        backdrop: Some(Backdrop {
            color: "rgba(0, 0, 0, 0.9)",
            corner_radius_px: 0,
        }),
        layers: vec![TextLayer {
            text: text.to_string(),
            color: TEXT_WHITE,
            font_size_px: 28,
            font_weight: 600,
            reveal: None,
        }],
    }
}

fn karaoke(text: &str, ctx: &FrameContext) -> OverlaySpec {
    let progress = karaoke_progress(ctx);

    OverlaySpec {
        placement: OverlayPlacement::BottomCentered {
            offset_px: KARAOKE_OFFSET_PX,
        },
        backdrop: None,
        layers: vec![
            // Full-opacity base text in the dimmed color
            TextLayer {
                text: text.to_string(),
                color: KARAOKE_BASE_COLOR,
                font_size_px: 36,
                font_weight: 700,
                reveal: None,
            },
            // Highlight layer clipped to the revealed width
            TextLayer {
                text: text.to_string(),
                color: KARAOKE_HIGHLIGHT_COLOR,
                font_size_px: 36,
                font_weight: 700,
                reveal: Some(progress),
            },
        ],
    }
}
