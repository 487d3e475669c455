//! Configuration system.
//! TOML-based, 3-layer resolution: overrides > env > project file > defaults.

pub mod dispatch_config;
pub mod gnn_config;
pub mod model_config;
pub mod training_config;

pub use dispatch_config::DispatchConfig;
pub use gnn_config::{normalize_backend, ConfigOverrides, GnnConfig};
pub use model_config::ModelConfig;
pub use training_config::TrainingConfig;
