/// Error types for loading and lookups
///
/// Errors that travel through an iced `Message` must be `Clone`,
/// so underlying causes are captured as strings.
use thiserror::Error;

use crate::state::data::PhotoId;

/// Failure while fetching the dataset or a photo
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// Local file could not be read
    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    /// Server answered with a non-success status
    #[error("HTTP error! status: {0}")]
    Http(u16),

    /// Request never produced a response (DNS, TLS, connection reset...)
    #[error("request failed: {0}")]
    Request(String),

    /// Body was not a JSON array of records
    #[error("malformed dataset: {0}")]
    Parse(String),

    /// Image bytes could not be decoded
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// Blocking worker panicked or was cancelled
    #[error("task join error: {0}")]
    Join(String),
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => LoadError::Http(status.as_u16()),
            None => LoadError::Request(err.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for LoadError {
    fn from(err: tokio::task::JoinError) -> Self {
        LoadError::Join(err.to_string())
    }
}

/// A photo id that is not part of the loaded dataset
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("photo not found: {0}")]
    PhotoNotFound(PhotoId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message() {
        assert_eq!(LoadError::Http(404).to_string(), "HTTP error! status: 404");
    }

    #[test]
    fn test_lookup_error_names_the_id() {
        let err = LookupError::PhotoNotFound(PhotoId::Number(42));
        assert_eq!(err.to_string(), "photo not found: 42");
    }
}
