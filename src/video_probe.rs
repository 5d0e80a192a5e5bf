use std::path::Path;
use anyhow::{anyhow, Context, Result};
use log::{debug, error};
use serde_json::{from_str, Value};
use tokio::process::Command;

// @module: Video file probing via ffprobe

/// Check whether a path looks like an MP4 file.
///
/// This mirrors the upload boundary: only MP4 input is accepted.
pub fn is_mp4<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp4"))
        .unwrap_or(false)
}

/// Probe the duration of a video file in seconds.
///
/// Uses ffprobe with a timeout to avoid hanging on problematic files.
pub async fn probe_duration<P: AsRef<Path>>(video_path: P) -> Result<f64> {
    let video_path = video_path.as_ref();

    if !video_path.exists() {
        return Err(anyhow!("Video file not found: {:?}", video_path));
    }

    let ffprobe_future = Command::new("ffprobe")
        .args([
            "-v", "quiet",
            "-print_format", "json",
            "-show_format",
            video_path.to_str().unwrap_or(""),
        ])
        .output();

    let timeout_duration = std::time::Duration::from_secs(60); // 1 minute timeout
    let output = tokio::select! {
        result = ffprobe_future => {
            result.map_err(|e| anyhow!("Failed to execute ffprobe command: {}", e))?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(anyhow!("ffprobe command timed out after 60 seconds"));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("ffprobe failed: {}", stderr);
        return Err(anyhow!("ffprobe command failed: {}", stderr));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: Value = from_str(&stdout).context("Failed to parse ffprobe JSON output")?;

    let duration = json
        .get("format")
        .and_then(|f| f.get("duration"))
        .and_then(|d| d.as_str())
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| anyhow!("ffprobe output did not contain a duration"))?;

    debug!("Probed duration {:.3}s for {:?}", duration, video_path);
    Ok(duration)
}
