use thiserror::Error;

/// Error taxonomy for a sync run
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {detail}")]
    Transport {
        detail: String,
        status: Option<u16>,
        body: Option<String>,
    },

    #[error("Malformed response data: {0}")]
    MalformedData(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl SyncError {
    /// Create a new Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a Transport error with no HTTP response (connection-level failure)
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
            status: None,
            body: None,
        }
    }

    /// Create a Transport error from a non-2xx HTTP response
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::Transport {
            detail: format!("HTTP {status}"),
            status: Some(status),
            body: Some(body.into()),
        }
    }

    /// Create a new MalformedData error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedData(message.into())
    }

    /// Create a new Unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Transport { .. } => ErrorCategory::Transport,
            Self::MalformedData(_) => ErrorCategory::Decode,
            Self::Unexpected(_) => ErrorCategory::Unexpected,
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedData(err.to_string())
    }
}

/// Error categories for log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Transport,
    Decode,
    Unexpected,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::Transport => write!(f, "transport"),
            Self::Decode => write!(f, "decode"),
            Self::Unexpected => write!(f, "unexpected"),
        }
    }
}

/// Convenience result type for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error() {
        let err = SyncError::configuration("PULUMI_ORG is required");
        assert_eq!(err.to_string(), "Configuration error: PULUMI_ORG is required");
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_transport_error_without_response() {
        let err = SyncError::transport("connection refused");
        assert_eq!(err.to_string(), "Transport error: connection refused");
        assert!(matches!(
            err,
            SyncError::Transport {
                status: None,
                body: None,
                ..
            }
        ));
    }

    #[test]
    fn test_http_status_error_carries_response_detail() {
        let err = SyncError::http_status(502, "bad gateway");
        assert_eq!(err.to_string(), "Transport error: HTTP 502");
        match err {
            SyncError::Transport { status, body, .. } => {
                assert_eq!(status, Some(502));
                assert_eq!(body.as_deref(), Some("bad gateway"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope }").unwrap_err();
        let err: SyncError = json_err.into();
        assert!(matches!(err, SyncError::MalformedData(_)));
        assert_eq!(err.category(), ErrorCategory::Decode);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Configuration.to_string(), "configuration");
        assert_eq!(ErrorCategory::Transport.to_string(), "transport");
        assert_eq!(ErrorCategory::Decode.to_string(), "decode");
        assert_eq!(ErrorCategory::Unexpected.to_string(), "unexpected");
    }
}
