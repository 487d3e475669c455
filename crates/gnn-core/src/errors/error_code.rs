//! GnnErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// alongside its human-readable message.
pub trait GnnErrorCode {
    /// Returns the error code string (e.g., "INPUT_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INPUT_ERROR: &str = "INPUT_ERROR";
pub const UNKNOWN_BACKEND: &str = "UNKNOWN_BACKEND";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const DEGENERATE_SCORES: &str = "DEGENERATE_SCORES";
pub const WORKER_POOL_ERROR: &str = "WORKER_POOL_ERROR";
