// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::Config;
use crate::overlay::CaptionStyle;
use crate::session::PlaybackSession;
use crate::transcription_service::TranscriptionService;

mod app_config;
mod caption_track;
mod errors;
mod normalizer;
mod overlay;
mod providers;
mod session;
mod timeline;
mod transcription_service;
mod video_probe;

/// CLI Wrapper for CaptionStyle to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliCaptionStyle {
    BottomCentered,
    TopBar,
    Karaoke,
}

impl From<CliCaptionStyle> for CaptionStyle {
    fn from(cli_style: CliCaptionStyle) -> Self {
        match cli_style {
            CliCaptionStyle::BottomCentered => CaptionStyle::BottomCentered,
            CliCaptionStyle::TopBar => CaptionStyle::TopBar,
            CliCaptionStyle::Karaoke => CaptionStyle::Karaoke,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// autocap - AI-powered video captioning
///
/// Transcribes a video via the Gemini API, normalizes the result into a
/// caption track, and writes it out as SRT. Optionally dumps the per-frame
/// overlay timeline for an offline render pass.
#[derive(Parser, Debug)]
#[command(name = "autocap")]
#[command(version = "0.1.0")]
#[command(about = "AI-powered video captioning tool")]
#[command(long_about = "autocap sends a video to the Gemini API for transcription and turns the
result into a validated, time-coded caption track.

EXAMPLES:
    autocap movie.mp4                          # Caption using default config
    autocap movie.mp4 -k $GEMINI_API_KEY       # Pass the API key explicitly
    autocap movie.mp4 -s karaoke               # Select the karaoke style
    autocap movie.mp4 -o captions.srt          # Choose the SRT output path
    autocap movie.mp4 --dump-overlays out.json # Dump per-frame overlays
    autocap --log-level debug movie.mp4        # Verbose logging

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist,
    a default one will be created automatically. The API key can also be
    supplied via the GEMINI_API_KEY environment variable.")]
struct CommandLineOptions {
    /// Input MP4 video file to caption
    #[arg(value_name = "VIDEO_PATH")]
    video_path: PathBuf,

    /// Output SRT file path (defaults to the video path with .srt extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Gemini API key
    #[arg(short = 'k', long, env = "GEMINI_API_KEY")]
    api_key: Option<String>,

    /// Model name to use for transcription
    #[arg(short, long)]
    model: Option<String>,

    /// Caption style for overlay rendering
    #[arg(short, long, value_enum)]
    style: Option<CliCaptionStyle>,

    /// Playback frames per second
    #[arg(long)]
    fps: Option<f64>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Write the per-frame overlay timeline to this JSON file
    #[arg(long)]
    dump_overlays: Option<PathBuf>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let options = CommandLineOptions::parse();
    run_caption(options).await
}

async fn run_caption(options: CommandLineOptions) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    // Override config with CLI options if provided
    if let Some(api_key) = &options.api_key {
        config.provider.api_key = api_key.clone();
    }
    if let Some(model) = &options.model {
        config.provider.model = model.clone();
    }
    if let Some(style) = &options.style {
        config.style = style.clone().into();
    }
    if let Some(fps) = options.fps {
        config.playback.fps = fps;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let video_path = &options.video_path;
    if !video_path.is_file() {
        return Err(anyhow!("Input video does not exist: {:?}", video_path));
    }
    if !video_probe::is_mp4(video_path) {
        return Err(anyhow!("Input must be an MP4 file: {:?}", video_path));
    }

    // Probe the duration up front; it also drives the overlay dump length
    let duration_secs = video_probe::probe_duration(video_path).await?;
    info!("Video duration: {:.1}s", duration_secs);
    if duration_secs > 60.0 {
        warn!("Video is longer than one minute; transcription may be slow or truncated");
    }

    // Transcribe with a spinner for feedback during the API call
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Transcribing audio...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let service = TranscriptionService::new(&config.provider);
    let track = match service.generate_captions(video_path).await {
        Ok(track) => {
            spinner.finish_with_message(format!("Generated {} caption segments", track.len()));
            track
        }
        Err(e) => {
            spinner.finish_and_clear();
            return Err(anyhow!("Caption generation failed: {}", e));
        }
    };

    // Write the SRT output
    let output_path = options
        .output
        .clone()
        .unwrap_or_else(|| video_path.with_extension("srt"));
    track.write_to_srt(&output_path)?;
    info!("Wrote captions to {}", output_path.display());

    // Optional offline render pass: dump the per-frame overlay timeline
    if let Some(dump_path) = &options.dump_overlays {
        let mut session = PlaybackSession::new(config.playback.fps);
        session.load_video(video_path);
        session.set_style(config.style);
        session.set_track(track);

        let total_frames = (duration_secs * config.playback.fps).ceil() as u64;
        let timeline = session.overlay_timeline(total_frames);

        let json = serde_json::to_string_pretty(&timeline)
            .context("Failed to serialize overlay timeline")?;
        std::fs::write(dump_path, json)
            .with_context(|| format!("Failed to write overlay dump: {}", dump_path.display()))?;
        info!(
            "Wrote {} frame overlays to {}",
            timeline.len(),
            dump_path.display()
        );
    }

    Ok(())
}
