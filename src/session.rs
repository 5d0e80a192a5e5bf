use std::path::{Path, PathBuf};
use log::{debug, info};
use serde::Serialize;

use crate::caption_track::CaptionTrack;
use crate::overlay::{self, CaptionStyle, FrameContext, OverlaySpec};
use crate::timeline;

// @module: Playback session state

/// One overlay in a rendered timeline, tagged with its frame and time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOverlay {
    /// Frame index
    pub frame: u64,
    /// Playback time in seconds
    pub time: f64,
    /// The overlay to draw for this frame
    pub overlay: OverlaySpec,
}

/// Explicit session state owned by the host application.
///
/// The session holds what the surrounding UI would otherwise keep in
/// mutable globals: the loaded video, the current caption track, and the
/// selected style. The core components never read ambient state; they
/// receive everything from here as plain arguments.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    /// Path of the loaded video, if any
    video_path: Option<PathBuf>,
    /// Current caption track, if a transcription has completed
    track: Option<CaptionTrack>,
    /// Selected caption style
    style: CaptionStyle,
    /// Frames per second of the playback clock
    fps: f64,
}

impl PlaybackSession {
    /// Create a new session with no video loaded
    pub fn new(fps: f64) -> Self {
        PlaybackSession {
            video_path: None,
            track: None,
            style: CaptionStyle::default(),
            fps,
        }
    }

    /// Load a new video, discarding any captions from the previous one.
    ///
    /// This is what invalidates interest in an in-flight transcription for
    /// an earlier video: its track, when it arrives, is simply never set on
    /// the session that has moved on.
    pub fn load_video<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        info!("Loading video: {}", path.display());
        self.video_path = Some(path.to_path_buf());
        self.track = None;
    }

    /// Replace the caption track wholesale
    pub fn set_track(&mut self, track: CaptionTrack) {
        debug!("Setting caption track with {} segments", track.len());
        self.track = Some(track);
    }

    /// Select the caption style
    pub fn set_style(&mut self, style: CaptionStyle) {
        self.style = style;
    }

    /// The loaded video path, if any
    pub fn video_path(&self) -> Option<&Path> {
        self.video_path.as_deref()
    }

    /// The current caption track, if any
    pub fn track(&self) -> Option<&CaptionTrack> {
        self.track.as_ref()
    }

    /// The selected caption style
    pub fn style(&self) -> CaptionStyle {
        self.style
    }

    /// Frames per second of the playback clock
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Resolve and render the caption overlay for one frame of playback.
    ///
    /// Called once per rendering tick by the playback driver. Pure with
    /// respect to the frame index, so frames may also be evaluated out of
    /// order or in parallel for an offline export.
    pub fn overlay_at_frame(&self, frame: u64) -> Option<OverlaySpec> {
        let track = self.track.as_ref()?;
        let ctx = FrameContext::new(frame, self.fps);
        let caption = timeline::resolve(track, ctx.time());
        overlay::render(caption, self.style, &ctx)
    }

    /// Render the overlay timeline for the first `total_frames` frames.
    ///
    /// Frames with no active caption are omitted. Used for the offline
    /// render pass.
    pub fn overlay_timeline(&self, total_frames: u64) -> Vec<FrameOverlay> {
        (0..total_frames)
            .filter_map(|frame| {
                self.overlay_at_frame(frame).map(|overlay| FrameOverlay {
                    frame,
                    time: timeline::time_at_frame(frame, self.fps),
                    overlay,
                })
            })
            .collect()
    }
}
