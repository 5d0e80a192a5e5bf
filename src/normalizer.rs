use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::caption_track::{CaptionSegment, CaptionTrack};
use crate::errors::CaptionError;

// @module: Caption normalization from raw transcription output

// @const: Markdown code fence markers wrapped around JSON payloads
static CODE_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:json)?\n?").unwrap()
});

/// Placeholder spacing when a candidate carries no usable start time:
/// candidate `i` starts at `i * 3` seconds.
const FALLBACK_SPACING_SECS: f64 = 3.0;

/// Default duration when a candidate carries no usable end time
const FALLBACK_DURATION_SECS: f64 = 3.0;

/// Coerced duration when a candidate's end does not come after its start
const COERCED_DURATION_SECS: f64 = 2.0;

/// Untrusted input to the normalizer: a structurally loose record as the
/// transcription service returns it. Timing fields may be numbers, numeric
/// strings, or junk; text may live under `text` or `transcript`; any field
/// may be absent.
#[derive(Debug, Clone, Default)]
pub struct RawCaptionCandidate {
    // @field: Start time, number or numeric string
    pub start: Option<Value>,

    // @field: End time, number or numeric string
    pub end: Option<Value>,

    // @field: Caption text
    pub text: Option<String>,

    // @field: Alternate text key used by some transcription responses
    pub transcript: Option<String>,
}

impl RawCaptionCandidate {
    /// Create a candidate with numeric timing - used by tests and callers
    /// that re-feed normalized output
    pub fn timed(start: f64, end: f64, text: impl Into<String>) -> Self {
        RawCaptionCandidate {
            start: Some(Value::from(start)),
            end: Some(Value::from(end)),
            text: Some(text.into()),
            transcript: None,
        }
    }

    /// Create a candidate carrying only text, no timing
    pub fn text_only(text: impl Into<String>) -> Self {
        RawCaptionCandidate {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Convert a parsed JSON value into a candidate.
    ///
    /// Mis-typed fields degrade to `None` (the per-candidate fallbacks cover
    /// them); a non-object element means the payload is not the homogeneous
    /// list we were promised.
    fn from_value(value: &Value) -> Result<Self, CaptionError> {
        let object = value.as_object().ok_or_else(|| {
            CaptionError::MalformedInput(format!(
                "caption candidate is not a JSON object: {}",
                value
            ))
        })?;

        Ok(RawCaptionCandidate {
            start: object.get("start").cloned(),
            end: object.get("end").cloned(),
            text: object.get("text").and_then(|v| v.as_str()).map(str::to_string),
            transcript: object
                .get("transcript")
                .and_then(|v| v.as_str())
                .map(str::to_string),
        })
    }
}

/// Strip Markdown code fences the transcription model sometimes wraps its
/// JSON answer in
fn strip_code_fences(payload: &str) -> String {
    let trimmed = payload.trim();
    if trimmed.starts_with("```") {
        CODE_FENCE_REGEX.replace_all(trimmed, "").trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse a raw transcription response into caption candidates.
///
/// The payload is expected to be a JSON array, possibly wrapped in code
/// fences. Anything that does not parse as a homogeneous list of objects
/// fails with [`CaptionError::MalformedInput`] before any per-candidate
/// processing begins.
pub fn parse_transcription_payload(payload: &str) -> Result<Vec<RawCaptionCandidate>, CaptionError> {
    let stripped = strip_code_fences(payload);

    let value: Value = serde_json::from_str(&stripped)
        .map_err(|e| CaptionError::MalformedInput(e.to_string()))?;

    let items = value.as_array().ok_or_else(|| {
        CaptionError::MalformedInput("expected a JSON array of caption candidates".to_string())
    })?;

    items.iter().map(RawCaptionCandidate::from_value).collect()
}

/// Read a timing value that may be a number or a numeric string
fn time_from_value(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Normalize raw transcription candidates into a validated caption track.
///
/// Each candidate is processed independently, in input order:
/// missing/unparseable start falls back to `i * 3` seconds, missing end to
/// `start + 3`, an end that does not come after its start is coerced to
/// `start + 2`, and candidates whose trimmed text is empty are dropped.
/// These coercions are defined fallbacks, not errors. No re-sorting is
/// performed; the output preserves input order.
///
/// Fails with [`CaptionError::EmptyResult`] if zero segments survive.
pub fn normalize(candidates: &[RawCaptionCandidate]) -> Result<CaptionTrack, CaptionError> {
    let mut segments = Vec::with_capacity(candidates.len());

    for (index, candidate) in candidates.iter().enumerate() {
        let start = time_from_value(candidate.start.as_ref())
            .unwrap_or(index as f64 * FALLBACK_SPACING_SECS);

        let mut end = time_from_value(candidate.end.as_ref())
            .unwrap_or(start + FALLBACK_DURATION_SECS);

        if end <= start {
            debug!(
                "Candidate {} has end {} <= start {}, coercing duration",
                index, end, start
            );
            end = start + COERCED_DURATION_SECS;
        }

        let text = candidate
            .text
            .as_deref()
            .or(candidate.transcript.as_deref())
            .unwrap_or("")
            .trim();

        if text.is_empty() {
            debug!("Dropping candidate {} with empty text", index);
            continue;
        }

        segments.push(CaptionSegment::new(start, end, text));
    }

    if segments.is_empty() {
        return Err(CaptionError::EmptyResult);
    }

    debug!("Normalized {} caption segments from {} candidates", segments.len(), candidates.len());
    Ok(CaptionTrack::from_segments(segments))
}

/// Parse and normalize a transcription response in one step
pub fn normalize_payload(payload: &str) -> Result<CaptionTrack, CaptionError> {
    let candidates = parse_transcription_payload(payload)?;
    normalize(&candidates)
}
