//! Shared constants for the pairwise scoring engine.

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---- Model ----

/// Default hidden-layer width of the generative network.
pub const DEFAULT_HIDDEN_WIDTH: usize = 20;

/// Default standard deviation of the normal parameter initializer.
pub const DEFAULT_INIT_STD: f64 = 0.05;

// ---- Training ----

/// Default Adam step size.
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Default number of optimization steps per direction.
pub const DEFAULT_TRAIN_STEPS: usize = 1000;

/// Default number of evaluation passes per direction.
pub const DEFAULT_EVAL_STEPS: usize = 500;

/// Default progress logging interval in steps (0 disables).
pub const DEFAULT_LOG_INTERVAL: usize = 100;

/// Default Gaussian kernel bandwidths of the MMD criterion.
pub const DEFAULT_BANDWIDTHS: [f64; 5] = [0.01, 0.1, 1.0, 10.0, 100.0];

/// Adam first-moment decay.
pub const ADAM_BETA1: f64 = 0.9;

/// Adam second-moment decay.
pub const ADAM_BETA2: f64 = 0.999;

/// Adam denominator guard.
pub const ADAM_EPSILON: f64 = 1e-8;

// ---- Dispatch ----

/// Default number of independent restarts.
pub const DEFAULT_NB_RUN: usize = 8;

/// Default worker count (0 = one per available core).
pub const DEFAULT_NB_JOBS: usize = 0;

/// Default size of the logical device pool.
pub const DEFAULT_DEVICE_COUNT: usize = 1;

/// Default first device id of the pool.
pub const DEFAULT_DEVICE_OFFSET: usize = 0;

// ---- Backends ----

/// Backend used when none is configured.
pub const DEFAULT_BACKEND: &str = "eager";

/// Number of supported backends.
pub const SUPPORTED_BACKEND_COUNT: usize = 2;

/// Supported backend selectors.
pub const SUPPORTED_BACKENDS: [&str; SUPPORTED_BACKEND_COUNT] = ["eager", "graph"];

/// Project config file name looked up by `GnnConfig::load`.
pub const PROJECT_CONFIG_FILE: &str = "gnn.toml";
