//! Backend selection errors.

use super::error_code::{self, GnnErrorCode};

/// Errors raised while resolving the execution backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("no backend known as '{selector}' (expected one of: eager, graph)")]
    Unknown { selector: String },
}

impl GnnErrorCode for BackendError {
    fn error_code(&self) -> &'static str {
        error_code::UNKNOWN_BACKEND
    }
}
