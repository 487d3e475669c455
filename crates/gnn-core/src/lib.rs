//! # gnn-core
//!
//! Foundation crate for pairwise causal-direction scoring.
//! Defines the sample types, standardization, errors, config, constants,
//! and tracing setup. The scoring engine in `gnn-pairwise` depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::GnnConfig;
pub use errors::{BackendError, ConfigError, InputError, PredictError};
pub use types::{Direction, Preference, SampleMatrix};
