// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for LogMorph
//!
//! Covers the transport and HTTP model layers. Failures raised by a
//! downstream [`Chain`](crate::network::Chain) are never converted into this
//! type by the interceptor; they are handed back to the caller untouched.

use thiserror::Error;

/// Result type alias for LogMorph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for LogMorph
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Body could not be read or decoded
    #[error("Body error: {0}")]
    Body(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new body error
    pub fn body<S: Into<String>>(msg: S) -> Self {
        Error::Body(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Check if this is a transport-level error
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Check if this is a timeout reported by the transport
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout(),
            Error::Io(e) => e.kind() == std::io::ErrorKind::TimedOut,
            _ => false,
        }
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(Error::body("stream reset").to_string(), "Body error: stream reset");
        assert_eq!(
            Error::config("missing tag").to_string(),
            "Configuration error: missing tag"
        );
        assert_eq!(Error::from("plain").to_string(), "plain");
    }

    #[test]
    fn test_io_timeout() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::TimedOut, "slow"));
        assert!(err.is_timeout());
        assert!(!err.is_network());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_url_error() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, Error::Url(_)));
    }
}
