/*!
 * Timeline resolution: which caption is active at a playback instant.
 *
 * The resolver is stateless and pure. It has no dependency on a frame
 * clock, only on an already-computed real-valued time; the playback driver
 * converts frames to time at the boundary.
 */

use crate::caption_track::{CaptionSegment, CaptionTrack};

/// Convert a frame index to playback time in seconds.
///
/// `fps` must be positive; that is the playback driver's contract and is
/// not re-validated per frame.
pub fn time_at_frame(frame: u64, fps: f64) -> f64 {
    frame as f64 / fps
}

/// Return the active caption at `at_time`, if any.
///
/// Policy: the first segment in track order whose half-open interval
/// `[start, end)` contains `at_time` wins. Overlapping segments are
/// permitted by the data model; track order makes the result deterministic.
/// No active caption is a valid result, not an error.
pub fn resolve(track: &CaptionTrack, at_time: f64) -> Option<&CaptionSegment> {
    track.segments().iter().find(|segment| segment.contains(at_time))
}

/// Resolve the active caption for a frame of playback
pub fn resolve_at_frame(track: &CaptionTrack, frame: u64, fps: f64) -> Option<&CaptionSegment> {
    resolve(track, time_at_frame(frame, fps))
}
