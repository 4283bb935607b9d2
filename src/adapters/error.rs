//! Error types for content API calls.

use thiserror::Error;

/// Result type for content API operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Why a content API call did not produce a value
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failed, timed out, or the body could not be read
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The content API key was missing or rejected
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// The requested post or tag does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-2xx response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The body was not the expected JSON shape
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The client could not be built from the given settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Gateway or maintenance response (502, 503, 504)
    #[error("Content API unavailable: {0}")]
    Unavailable(String),
}

impl FetchError {
    /// Build the error for a non-2xx status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => FetchError::Unauthorized { status, message },
            404 => FetchError::NotFound(message),
            502..=504 => FetchError::Unavailable(format!("{} {}", status, message)),
            _ => FetchError::Api { status, message },
        }
    }

    /// Short label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Unauthorized { .. } => "unauthorized",
            FetchError::NotFound(_) => "not_found",
            FetchError::Api { .. } => "api",
            FetchError::Decode(_) => "decode",
            FetchError::Config(_) => "config",
            FetchError::Unavailable(_) => "unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            FetchError::from_status(401, "bad key"),
            FetchError::Unauthorized { status: 401, .. }
        ));
        assert!(matches!(
            FetchError::from_status(404, "gone"),
            FetchError::NotFound(_)
        ));
        assert!(matches!(
            FetchError::from_status(500, "boom"),
            FetchError::Api { status: 500, .. }
        ));
        assert_eq!(FetchError::from_status(403, "x").kind(), "unauthorized");
    }

    #[test]
    fn test_gateway_statuses_are_unavailable() {
        let err = FetchError::from_status(503, "Site is undergoing maintenance");
        assert_eq!(err.kind(), "unavailable");
        assert_eq!(
            err.to_string(),
            "Content API unavailable: 503 Site is undergoing maintenance"
        );
        assert!(matches!(
            FetchError::from_status(502, ""),
            FetchError::Unavailable(_)
        ));
    }
}
