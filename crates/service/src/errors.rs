use thiserror::Error;

/// Client-visible failure of an API operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    #[error("No authentication token found. Please login.")]
    Unauthenticated,
    #[error("Session expired. Please login again.")]
    SessionExpired,
    #[error("Server returned non-JSON response")]
    Protocol { status: u16, content_type: Option<String> },
    #[error("{message}")]
    RequestFailed { status: u16, message: String },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("login response did not contain a token")]
    MissingToken,
}

impl ClientError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ClientError::Unauthenticated => 2001,
            ClientError::SessionExpired => 2002,
            ClientError::Protocol { .. } => 2101,
            ClientError::RequestFailed { .. } => 2102,
            ClientError::Validation(_) => 2201,
            ClientError::Transport(_) => 2301,
            ClientError::Decode(_) => 2302,
            ClientError::MissingToken => 2401,
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Unauthenticated => "unauthenticated",
            ClientError::SessionExpired => "session_expired",
            ClientError::Protocol { .. } => "protocol",
            ClientError::RequestFailed { .. } => "request_failed",
            ClientError::Validation(_) => "validation",
            ClientError::Transport(_) => "transport",
            ClientError::Decode(_) => "decode",
            ClientError::MissingToken => "missing_token",
        }
    }

    /// Failures worth another attempt for an idempotent read.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::RequestFailed { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }

    /// HTTP status attached to the failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::SessionExpired => Some(401),
            ClientError::Protocol { status, .. } | ClientError::RequestFailed { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 502..=504)
}

impl From<models::ModelError> for ClientError {
    fn from(e: models::ModelError) -> Self {
        match e {
            models::ModelError::Validation(msg) => ClientError::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_user_facing_text() {
        assert_eq!(
            ClientError::Unauthenticated.to_string(),
            "No authentication token found. Please login."
        );
        assert_eq!(
            ClientError::Protocol { status: 200, content_type: Some("text/html".into()) }
                .to_string(),
            "Server returned non-JSON response"
        );
        let failed = ClientError::RequestFailed { status: 400, message: "bad".into() };
        assert_eq!(failed.to_string(), "bad");
    }

    #[test]
    fn only_gateway_failures_and_network_errors_retry() {
        assert!(ClientError::Transport("reset".into()).is_retryable());
        assert!(ClientError::RequestFailed { status: 503, message: String::new() }.is_retryable());
        assert!(!ClientError::RequestFailed { status: 500, message: String::new() }.is_retryable());
        assert!(!ClientError::SessionExpired.is_retryable());
    }

    #[test]
    fn model_validation_maps_through() {
        let e: ClientError = models::ModelError::required("title").into();
        assert_eq!(e, ClientError::Validation("title is required".into()));
        assert_eq!(e.code(), 2201);
    }
}
