//! Top-level prediction errors.

use super::error_code::{self, GnnErrorCode};
use super::{BackendError, ConfigError, InputError};

/// Errors surfaced by the predict operations.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Both aggregated direction scores sum to zero (or no run produced a score).
    #[error("degenerate direction scores: mean_ab={mean_ab}, mean_ba={mean_ba}")]
    DegenerateScores { mean_ab: f64, mean_ba: f64 },

    #[error("worker pool could not be built: {message}")]
    WorkerPool { message: String },
}

impl GnnErrorCode for PredictError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Input(e) => e.error_code(),
            Self::Backend(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::DegenerateScores { .. } => error_code::DEGENERATE_SCORES,
            Self::WorkerPool { .. } => error_code::WORKER_POOL_ERROR,
        }
    }
}

/// Shorthand for results of the predict operations.
pub type PredictResult<T> = Result<T, PredictError>;
