use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// @module: Caption track data model

/// A single timed piece of caption text.
///
/// Segments are produced by the normalizer, which guarantees `end > start`
/// and non-empty trimmed text. Times are seconds from video start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Caption text
    pub text: String,
}

impl CaptionSegment {
    /// Create a new caption segment
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        CaptionSegment {
            start,
            end,
            text: text.into(),
        }
    }

    /// Segment duration in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Half-open interval containment: `start <= at_time < end`.
    ///
    /// A caption disappears exactly at its own end time, so back-to-back
    /// segments sharing a boundary never both contain the same instant.
    pub fn contains(&self, at_time: f64) -> bool {
        self.start <= at_time && at_time < self.end
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end)
    }

    /// Format a timestamp in seconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(seconds: f64) -> String {
        let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let secs = (total_ms % 60_000) / 1_000;
        let millis = total_ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
    }
}

impl fmt::Display for CaptionSegment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)
    }
}

/// The ordered, validated sequence of caption segments for one video.
///
/// A track is constructed once per successful transcription and is immutable
/// thereafter; loading a new video or a new transcription replaces it
/// wholesale. Input order is preserved exactly as the normalizer received it,
/// so consumers must not assume strictly ascending start times.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaptionTrack {
    segments: Vec<CaptionSegment>,
}

impl CaptionTrack {
    /// Create a track from already-validated segments.
    ///
    /// Normally only the normalizer constructs tracks; this is public for
    /// tests and for callers that load captions from trusted storage.
    pub fn from_segments(segments: Vec<CaptionSegment>) -> Self {
        CaptionTrack { segments }
    }

    /// The segments, in the order the normalizer received them
    pub fn segments(&self) -> &[CaptionSegment] {
        &self.segments
    }

    /// Number of segments in the track
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the track has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the segments in track order
    pub fn iter(&self) -> std::slice::Iter<'_, CaptionSegment> {
        self.segments.iter()
    }

    /// Render the track as SRT content
    pub fn to_srt(&self) -> String {
        let mut output = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            output.push_str(&format!("{}\n{}", i + 1, segment));
            output.push('\n');
        }
        output
    }

    /// Write the track to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create caption file: {}", path.display()))?;

        file.write_all(self.to_srt().as_bytes())
            .with_context(|| format!("Failed to write caption file: {}", path.display()))?;

        Ok(())
    }
}

impl fmt::Display for CaptionTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Caption Track")?;
        writeln!(f, "Segments: {}", self.segments.len())?;
        Ok(())
    }
}
