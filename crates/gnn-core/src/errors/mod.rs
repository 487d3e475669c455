//! Error handling for the scoring engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod backend_error;
pub mod config_error;
pub mod error_code;
pub mod input_error;
pub mod predict_error;

pub use backend_error::BackendError;
pub use config_error::ConfigError;
pub use error_code::GnnErrorCode;
pub use input_error::InputError;
pub use predict_error::{PredictError, PredictResult};
