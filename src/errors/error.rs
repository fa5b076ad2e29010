//! Error types for the AskForge API client.

use thiserror::Error;

/// Result type alias for AskForge operations
pub type AskForgeResult<T> = Result<T, AskForgeError>;

/// Main error type for the AskForge API client.
///
/// Fatal variants are surfaced exactly once per invocation through the
/// error callback; recoverable variants are logged and swallowed at the
/// point they occur.
#[derive(Error, Debug, Clone)]
pub enum AskForgeError {
    /// Configuration error (invalid settings, malformed base URL)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue
        message: String,
    },

    /// The request failed outright or returned a non-success status before
    /// any streaming began. Fatal for that invocation.
    #[error("Transport error: {message}")]
    Transport {
        /// Error message describing the transport failure
        message: String,
        /// HTTP status code, when the server responded at all
        status_code: Option<u16>,
    },

    /// Network error (connection failed, timeout, DNS issues)
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// Terminal stream failure: an `error`-typed event from the producer,
    /// or the byte stream breaking mid-flight.
    #[error("Stream error: {message}")]
    Stream {
        /// Error message describing the stream failure
        message: String,
    },

    /// A single frame's payload was malformed. Recovered locally: the frame
    /// is skipped and processing continues.
    #[error("Frame parse error: {message}")]
    FrameParse {
        /// Error message describing the malformed frame
        message: String,
    },

    /// A follow-up-question poll request failed. Recovered locally: the
    /// poll is abandoned without notifying the caller.
    #[error("Poll transport error: {message}")]
    PollTransport {
        /// Error message describing the poll failure
        message: String,
    },

    /// Internal error (unexpected conditions, library bugs)
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal issue
        message: String,
    },
}

impl AskForgeError {
    /// Returns true if this error terminates its invocation.
    ///
    /// `FrameParse` and `PollTransport` are handled where they arise and
    /// never reach the caller; everything else is fatal for the request
    /// that produced it.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            AskForgeError::FrameParse { .. } | AskForgeError::PollTransport { .. }
        )
    }

    /// The HTTP status code attached to this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AskForgeError::Transport { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

// Conversions from common error types
impl From<reqwest::Error> for AskForgeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AskForgeError::Network {
                message: format!("Request timed out: {}", err),
            }
        } else if err.is_connect() {
            AskForgeError::Network {
                message: format!("Connection failed: {}", err),
            }
        } else {
            AskForgeError::Network {
                message: format!("Network error: {}", err),
            }
        }
    }
}

impl From<serde_json::Error> for AskForgeError {
    fn from(err: serde_json::Error) -> Self {
        AskForgeError::Internal {
            message: format!("JSON serialization/deserialization error: {}", err),
        }
    }
}

impl From<url::ParseError> for AskForgeError {
    fn from(err: url::ParseError) -> Self {
        AskForgeError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}
