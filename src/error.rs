use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompletionError>;

/// Failure reported by the server in a non-200 response body.
///
/// `kind` is the server's `type` tag, kept verbatim so callers can branch on
/// values such as `invalid_request_error` or `insufficient_quota`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Deserialize)]
#[error("ApiError({kind}): {message}")]
pub struct ApiError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Envelope of the error body: `{"error": {"message": ..., "type": ...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiError,
}

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Failed to serialize completion request: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Request deadline exceeded")]
    DeadlineExceeded,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("invalid error body (status {status}): {source}")]
    InvalidErrorBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse completion response (status {status}): {source}")]
    Parse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CompletionError {
    /// True for failures before or during the HTTP exchange itself, including
    /// cancellation and deadline expiry.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CompletionError::Network { .. }
                | CompletionError::Cancelled
                | CompletionError::DeadlineExceeded
        )
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            CompletionError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status attached to a body that could not be decoded.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CompletionError::InvalidErrorBody { status, .. }
            | CompletionError::Parse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_type_and_message() {
        let err = ApiError {
            message: "You exceeded your current quota".to_string(),
            kind: "insufficient_quota".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ApiError(insufficient_quota): You exceeded your current quota"
        );
        assert_eq!(
            CompletionError::from(err).to_string(),
            "ApiError(insufficient_quota): You exceeded your current quota"
        );
    }

    #[test]
    fn error_body_requires_both_fields() {
        let body = r#"{"error": {"message": "missing type"}}"#;
        assert!(serde_json::from_str::<ApiErrorBody>(body).is_err());

        let body = r#"{"error": {"message": "bad", "type": "invalid_request_error", "code": null}}"#;
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.kind, "invalid_request_error");
    }

    #[test]
    fn invalid_error_body_reports_status() {
        let source = serde_json::from_str::<ApiErrorBody>("not json").unwrap_err();
        let err = CompletionError::InvalidErrorBody {
            status: 502,
            source,
        };

        assert_eq!(err.status_code(), Some(502));
        assert!(err.api_error().is_none());
        assert!(!err.is_transport());
        assert!(err.to_string().starts_with("invalid error body (status 502)"));
    }

    #[test]
    fn cancellation_counts_as_transport() {
        assert!(CompletionError::Cancelled.is_transport());
        assert!(CompletionError::DeadlineExceeded.is_transport());
        assert_eq!(CompletionError::Cancelled.status_code(), None);
    }
}
