//! Generative network configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Shape and initialization of the per-direction generative network.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Hidden-layer width. Default: 20.
    pub hidden_width: Option<usize>,
    /// Standard deviation of the normal initializer. Default: 0.05.
    pub init_std: Option<f64>,
}

impl ModelConfig {
    pub fn effective_hidden_width(&self) -> usize {
        self.hidden_width.unwrap_or(constants::DEFAULT_HIDDEN_WIDTH)
    }

    pub fn effective_init_std(&self) -> f64 {
        self.init_std.unwrap_or(constants::DEFAULT_INIT_STD)
    }
}
