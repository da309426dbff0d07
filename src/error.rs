//! Error types for ydk_converter

use std::fmt;

/// Unified error type for conversion and lookup operations
#[derive(Debug)]
pub enum ConvertError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// Failed to parse JSON response
    Parse(serde_json::Error),
    /// HTTP error status code
    HttpStatus(reqwest::StatusCode),
    /// Card database returned no record for the identifier
    CardNotFound(String),
    /// Deck list could not be converted. The detail is for server-side
    /// logging only; user-facing messages stay generic.
    InvalidFormat(String),
    /// File I/O error
    Io(std::io::Error),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Network(e) => write!(f, "Network error: {}", e),
            ConvertError::Parse(e) => write!(f, "Parse error: {}", e),
            ConvertError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            ConvertError::CardNotFound(id) => {
                write!(f, "Card not found in database: {}", id)
            }
            ConvertError::InvalidFormat(detail) => {
                write!(f, "Invalid YDK file format: {}", detail)
            }
            ConvertError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Network(e) => Some(e),
            ConvertError::Parse(e) => Some(e),
            ConvertError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ConvertError {
    fn from(err: reqwest::Error) -> Self {
        ConvertError::Network(err)
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Parse(err)
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::Io(err)
    }
}

/// Result alias for ydk_converter operations
pub type Result<T> = std::result::Result<T, ConvertError>;
