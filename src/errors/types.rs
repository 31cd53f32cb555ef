//! Error type definitions for the TVClub grabber

use thiserror::Error;

/// Top-level application error type
///
/// Every fallible operation of the library surfaces one of these variants.
/// Source failures (network and parsing) are fatal for a run; there is no
/// retry layer above them.
#[derive(Error, Debug)]
pub enum AppError {
    /// Fetching or parsing the listings feed failed
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Reading or writing a local file or the output sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Errors raised while retrieving and decoding the listings feed
#[derive(Error, Debug)]
pub enum SourceError {
    /// The request could not be sent or the body could not be read
    #[error("Network error: {url} - {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-success status
    #[error("HTTP error: {status} - {url}")]
    HttpStatus { status: u16, url: String },

    /// The request did not complete within the configured timeout
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// The body is not a well-formed XMLTV document
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// The body looked compressed but could not be decoded
    #[error("Decompression failed: {message}")]
    Decompression { message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a source parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Source(SourceError::parse(message))
    }
}

impl SourceError {
    /// Create a parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Map a reqwest failure onto the matching source error
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = error.status() {
            Self::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }
        } else {
            Self::Network {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }

    /// Whether this error comes from the transport rather than the content
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::HttpStatus { .. } | Self::Timeout { .. }
        )
    }
}
