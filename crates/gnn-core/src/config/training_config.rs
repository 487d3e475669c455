//! Training and evaluation configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Optimization and evaluation schedule for one direction.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TrainingConfig {
    /// Adam step size. Default: 0.01.
    pub learning_rate: Option<f64>,
    /// Optimization steps per direction. Default: 1000.
    pub train_steps: Option<usize>,
    /// Evaluation passes averaged into the direction score. Default: 500.
    pub eval_steps: Option<usize>,
    /// Progress log interval in steps, 0 disables. Default: 100.
    pub log_interval: Option<usize>,
    /// MMD kernel bandwidths. Empty means the compiled default set.
    #[serde(default)]
    pub bandwidths: Vec<f64>,
}

impl TrainingConfig {
    pub fn effective_learning_rate(&self) -> f64 {
        self.learning_rate.unwrap_or(constants::DEFAULT_LEARNING_RATE)
    }

    pub fn effective_train_steps(&self) -> usize {
        self.train_steps.unwrap_or(constants::DEFAULT_TRAIN_STEPS)
    }

    pub fn effective_eval_steps(&self) -> usize {
        self.eval_steps.unwrap_or(constants::DEFAULT_EVAL_STEPS)
    }

    pub fn effective_log_interval(&self) -> usize {
        self.log_interval.unwrap_or(constants::DEFAULT_LOG_INTERVAL)
    }

    pub fn effective_bandwidths(&self) -> Vec<f64> {
        if self.bandwidths.is_empty() {
            constants::DEFAULT_BANDWIDTHS.to_vec()
        } else {
            self.bandwidths.clone()
        }
    }
}
