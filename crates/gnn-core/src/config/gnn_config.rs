//! Top-level configuration with 3-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DispatchConfig, ModelConfig, TrainingConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`GNN_*`)
/// 3. Project config (`gnn.toml` in the project root)
/// 4. Compiled defaults
///
/// The value is passed explicitly to every operation; nothing reads a
/// process-wide default.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GnnConfig {
    /// Execution backend selector. Default: "eager".
    pub backend: Option<String>,
    pub model: ModelConfig,
    pub training: TrainingConfig,
    pub dispatch: DispatchConfig,
}

/// Override arguments that take precedence over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub backend: Option<String>,
    pub nb_run: Option<usize>,
    pub nb_jobs: Option<usize>,
    pub train_steps: Option<usize>,
    pub eval_steps: Option<usize>,
    pub seed: Option<u64>,
}

impl GnnConfig {
    /// Load configuration with 3-layer resolution.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3 (lowest priority): project config
        let project_config_path = root.join(constants::PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): explicit overrides
        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Effective backend selector, defaulting to "eager".
    pub fn effective_backend(&self) -> &str {
        self.backend.as_deref().unwrap_or(constants::DEFAULT_BACKEND)
    }

    /// Validate the configuration values.
    pub fn validate(config: &GnnConfig) -> Result<(), ConfigError> {
        let selector = config.effective_backend();
        if !constants::SUPPORTED_BACKENDS.contains(&normalize_backend(selector).as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "backend".to_string(),
                message: format!("unknown backend '{selector}'"),
            });
        }
        if config.model.effective_hidden_width() == 0 {
            return Err(validation("model.hidden_width", "must be greater than 0"));
        }
        let init_std = config.model.effective_init_std();
        if !(init_std.is_finite() && init_std > 0.0) {
            return Err(validation("model.init_std", "must be finite and greater than 0"));
        }
        let lr = config.training.effective_learning_rate();
        if !(lr.is_finite() && lr > 0.0) {
            return Err(validation(
                "training.learning_rate",
                "must be finite and greater than 0",
            ));
        }
        if config.training.effective_eval_steps() == 0 {
            return Err(validation("training.eval_steps", "must be greater than 0"));
        }
        if config
            .training
            .bandwidths
            .iter()
            .any(|b| !(b.is_finite() && *b > 0.0))
        {
            return Err(validation(
                "training.bandwidths",
                "every bandwidth must be finite and greater than 0",
            ));
        }
        if config.dispatch.effective_nb_run() == 0 {
            return Err(validation("dispatch.nb_run", "must be greater than 0"));
        }
        if config.dispatch.effective_device_count() == 0 {
            return Err(validation("dispatch.device_count", "must be greater than 0"));
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut GnnConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: GnnConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    pub fn merge(base: &mut GnnConfig, other: &GnnConfig) {
        if other.backend.is_some() {
            base.backend = other.backend.clone();
        }

        // Model
        if other.model.hidden_width.is_some() {
            base.model.hidden_width = other.model.hidden_width;
        }
        if other.model.init_std.is_some() {
            base.model.init_std = other.model.init_std;
        }

        // Training
        if other.training.learning_rate.is_some() {
            base.training.learning_rate = other.training.learning_rate;
        }
        if other.training.train_steps.is_some() {
            base.training.train_steps = other.training.train_steps;
        }
        if other.training.eval_steps.is_some() {
            base.training.eval_steps = other.training.eval_steps;
        }
        if other.training.log_interval.is_some() {
            base.training.log_interval = other.training.log_interval;
        }
        if !other.training.bandwidths.is_empty() {
            base.training.bandwidths = other.training.bandwidths.clone();
        }

        // Dispatch
        if other.dispatch.nb_run.is_some() {
            base.dispatch.nb_run = other.dispatch.nb_run;
        }
        if other.dispatch.nb_jobs.is_some() {
            base.dispatch.nb_jobs = other.dispatch.nb_jobs;
        }
        if other.dispatch.use_device_pool.is_some() {
            base.dispatch.use_device_pool = other.dispatch.use_device_pool;
        }
        if other.dispatch.device_count.is_some() {
            base.dispatch.device_count = other.dispatch.device_count;
        }
        if other.dispatch.device_offset.is_some() {
            base.dispatch.device_offset = other.dispatch.device_offset;
        }
        if other.dispatch.seed.is_some() {
            base.dispatch.seed = other.dispatch.seed;
        }
        if other.dispatch.common_random_numbers.is_some() {
            base.dispatch.common_random_numbers = other.dispatch.common_random_numbers;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `GNN_BACKEND`, `GNN_NB_RUN`, `GNN_TRAIN_STEPS`, etc.
    fn apply_env_overrides(config: &mut GnnConfig) {
        if let Ok(val) = std::env::var("GNN_BACKEND") {
            config.backend = Some(val);
        }
        if let Some(v) = env_parse::<usize>("GNN_HIDDEN_WIDTH") {
            config.model.hidden_width = Some(v);
        }
        if let Some(v) = env_parse::<f64>("GNN_INIT_STD") {
            config.model.init_std = Some(v);
        }
        if let Some(v) = env_parse::<f64>("GNN_LEARNING_RATE") {
            config.training.learning_rate = Some(v);
        }
        if let Some(v) = env_parse::<usize>("GNN_TRAIN_STEPS") {
            config.training.train_steps = Some(v);
        }
        if let Some(v) = env_parse::<usize>("GNN_EVAL_STEPS") {
            config.training.eval_steps = Some(v);
        }
        if let Some(v) = env_parse::<usize>("GNN_LOG_INTERVAL") {
            config.training.log_interval = Some(v);
        }
        if let Some(v) = env_parse::<usize>("GNN_NB_RUN") {
            config.dispatch.nb_run = Some(v);
        }
        if let Some(v) = env_parse::<usize>("GNN_NB_JOBS") {
            config.dispatch.nb_jobs = Some(v);
        }
        if let Some(v) = env_parse::<bool>("GNN_USE_DEVICE_POOL") {
            config.dispatch.use_device_pool = Some(v);
        }
        if let Some(v) = env_parse::<usize>("GNN_DEVICE_COUNT") {
            config.dispatch.device_count = Some(v);
        }
        if let Some(v) = env_parse::<usize>("GNN_DEVICE_OFFSET") {
            config.dispatch.device_offset = Some(v);
        }
        if let Some(v) = env_parse::<u64>("GNN_SEED") {
            config.dispatch.seed = Some(v);
        }
        if let Some(v) = env_parse::<bool>("GNN_COMMON_RANDOM_NUMBERS") {
            config.dispatch.common_random_numbers = Some(v);
        }
    }

    /// Apply explicit overrides (highest priority).
    pub fn apply_overrides(config: &mut GnnConfig, o: &ConfigOverrides) {
        if let Some(ref v) = o.backend {
            config.backend = Some(v.clone());
        }
        if let Some(v) = o.nb_run {
            config.dispatch.nb_run = Some(v);
        }
        if let Some(v) = o.nb_jobs {
            config.dispatch.nb_jobs = Some(v);
        }
        if let Some(v) = o.train_steps {
            config.training.train_steps = Some(v);
        }
        if let Some(v) = o.eval_steps {
            config.training.eval_steps = Some(v);
        }
        if let Some(v) = o.seed {
            config.dispatch.seed = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Canonical form of a backend selector: trimmed, ASCII lowercase.
pub fn normalize_backend(selector: &str) -> String {
    selector.trim().to_ascii_lowercase()
}

fn validation(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Parse an environment variable, ignoring unset or malformed values.
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}
