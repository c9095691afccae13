//! Error types surfaced by engine operations.

use devmatch_core::{FieldError, GatewayError};
use thiserror::Error;

/// Failure of an engine operation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Local field validation rejected the input before any network call.
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    /// The remote service rejected the call; a transient notice has already
    /// been posted with the user-facing message.
    #[error("remote call rejected")]
    Remote(#[source] GatewayError),
}

/// Convenience alias for engine operation results.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// One-line message suitable for direct display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(errors) => errors
                .iter()
                .map(|error| error.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            Self::Remote(gateway) => gateway.user_message(),
        }
    }
}
