//! Error types shared across the gateway seam.

use std::error::Error;

use thiserror::Error;

/// Failure surfaced by a remote call through the [`crate::MatchGateway`].
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The backend answered with a non-success status.
    #[error("request failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, when the error payload carried one.
        message: Option<String>,
    },
    /// The request never produced a response (DNS, connect, timeout).
    #[error("transport failure")]
    Transport {
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The response arrived but its payload could not be decoded.
    #[error("malformed response payload")]
    Decode {
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

/// Convenience alias for gateway call results.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// Fallback shown when the backend gives no usable message.
    pub const FALLBACK_MESSAGE: &'static str = "Something went wrong";

    /// Message suitable for a transient user-facing notice: the server's own
    /// error text when present, the generic fallback otherwise.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => Self::FALLBACK_MESSAGE.to_string(),
        }
    }

    /// Whether the failure indicates a missing or rejected session.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = GatewayError::Status {
            status: 400,
            message: Some("Invalid credentials".into()),
        };
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[test]
    fn user_message_falls_back_on_blank_payload() {
        let blank = GatewayError::Status {
            status: 500,
            message: Some("   ".into()),
        };
        assert_eq!(blank.user_message(), GatewayError::FALLBACK_MESSAGE);

        let transport = GatewayError::Transport {
            source: "connection refused".into(),
        };
        assert_eq!(transport.user_message(), GatewayError::FALLBACK_MESSAGE);
    }

    #[test]
    fn auth_failures_are_recognized() {
        let unauthorized = GatewayError::Status {
            status: 401,
            message: None,
        };
        assert!(unauthorized.is_auth_failure());

        let server_error = GatewayError::Status {
            status: 500,
            message: None,
        };
        assert!(!server_error.is_auth_failure());
    }
}
