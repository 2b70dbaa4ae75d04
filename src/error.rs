use thiserror::Error;

/// Errors surfaced to the host.
///
/// Rejected credentials and failed fetches are ordinary outcomes and are
/// reported as values by the client. Only the lifecycle layer turns a
/// rejected login into [`Error::AuthFailed`].
#[derive(Error, Debug)]
pub enum Error {
    /// The vendor rejected the stored credentials during setup.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The persisted entry data is missing a field or has the wrong shape.
    #[error("Invalid config entry: {0}")]
    InvalidEntry(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The blocking job panicked or was cancelled before completing.
    #[error("Blocking task failed: {0}")]
    Offload(String),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Offload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failed_message() {
        let err = Error::AuthFailed("Invalid authentication".to_string());
        assert_eq!(err.to_string(), "Authentication failed: Invalid authentication");
    }

    #[test]
    fn test_decode_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Decode(_)));
    }
}
