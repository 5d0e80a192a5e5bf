/*!
 * Error types for the autocap application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while building a caption track from transcription output
#[derive(Error, Debug)]
pub enum CaptionError {
    /// The transcription payload could not be parsed as a list of candidates.
    /// No partial track is produced.
    #[error("Transcription payload is not a caption list: {0}")]
    MalformedInput(String),

    /// Parsing succeeded but no segment survived text-emptiness filtering
    #[error("No caption segments survived normalization")]
    EmptyResult,
}

/// Errors that can occur when talking to the transcription provider API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails (network, DNS, timeout)
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself, with the provider's own message
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the transcription provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from caption normalization
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
