//! Error types for categorical parameter handling.

use thiserror::Error;

/// Result type alias using RemapError.
pub type RemapResult<T> = Result<T, RemapError>;

/// Errors raised while validating categorical remap parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemapError {
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: &'static str, message: String },

    #[error("Unknown {kind}: '{token}'")]
    UnknownToken { kind: &'static str, token: String },
}

impl RemapError {
    pub fn invalid(param: &'static str, message: impl Into<String>) -> Self {
        RemapError::InvalidParameter {
            param,
            message: message.into(),
        }
    }

    pub fn unknown(kind: &'static str, token: impl Into<String>) -> Self {
        RemapError::UnknownToken {
            kind,
            token: token.into(),
        }
    }

    /// Name of the offending parameter.
    pub fn param(&self) -> &'static str {
        match self {
            RemapError::InvalidParameter { param, .. } => param,
            RemapError::UnknownToken { kind, .. } => kind,
        }
    }
}
