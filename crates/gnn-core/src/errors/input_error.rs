//! Input shape errors.

use super::error_code::{self, GnnErrorCode};

/// Errors raised while validating a sample pair, before any run is dispatched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("sample length mismatch: cause has {cause_len} values, effect has {effect_len}")]
    LengthMismatch { cause_len: usize, effect_len: usize },

    #[error("sample is empty")]
    Empty,

    #[error("row {row} has {columns} column(s), at least 2 required")]
    TooFewColumns { row: usize, columns: usize },

    #[error("non-finite value in column {column} at index {index}")]
    NonFinite { column: usize, index: usize },
}

impl GnnErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        error_code::INPUT_ERROR
    }
}
