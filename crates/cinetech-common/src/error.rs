//! Common error types used throughout cinetech.
//!
//! The variants follow the failure classes of the catalog front end: the
//! remote API can be unreachable or answer with a non-success status, user
//! input can be rejected, and the local key-value substrate can fail.

/// Common error type for cinetech.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The network request could not be completed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote API answered with a non-success HTTP status.
    #[error("Remote API returned status {status}")]
    Remote {
        /// HTTP status code reported by the remote API.
        status: u16,
    },

    /// User input was rejected (e.g. an empty comment).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The local key-value substrate failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A remote or stored payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl Error {
    /// Create a new Transport error.
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new Remote error from an HTTP status code.
    pub fn remote(status: u16) -> Self {
        Self::Remote { status }
    }

    /// Create a new Validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new Storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new Decode error.
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }

    /// Whether the error came from talking to the remote catalog.
    pub fn is_remote_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Remote { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::transport("connection refused");
        assert_eq!(err.to_string(), "Transport error: connection refused");

        let err = Error::remote(404);
        assert_eq!(err.to_string(), "Remote API returned status 404");

        let err = Error::validation("comment is empty");
        assert_eq!(err.to_string(), "Validation error: comment is empty");

        let err = Error::not_found("comment 12");
        assert_eq!(err.to_string(), "Not found: comment 12");

        let err = Error::storage("disk full");
        assert_eq!(err.to_string(), "Storage error: disk full");
    }

    #[test]
    fn test_remote_failure_classification() {
        assert!(Error::transport("timeout").is_remote_failure());
        assert!(Error::remote(500).is_remote_failure());
        assert!(!Error::validation("empty").is_remote_failure());
        assert!(!Error::storage("locked").is_remote_failure());
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::Decode(_)));
    }
}
