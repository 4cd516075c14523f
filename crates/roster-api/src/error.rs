use serde::{Deserialize, Serialize};

use crate::models::FieldErrors;

/// Structured error types for remote collection operations.
///
/// The two classes get opposite treatment at the controller boundary:
/// `Transport` becomes a user-visible failure notice with no state change,
/// `Validation` is recovered locally by mapping onto the edit session's
/// per-field errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum RemoteError {
    /// Network failure or an unexpected non-2xx/non-400 status.
    #[error("Request failed: {message}")]
    Transport { message: String },

    /// 400 response whose body is a field-error map.
    #[error("Validation rejected the submission")]
    Validation { errors: FieldErrors },
}

impl RemoteError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}
