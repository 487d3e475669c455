//! Run dispatch configuration: restarts, workers, device pool, seeding.

use serde::{Deserialize, Serialize};

use crate::constants;

/// How independent runs are scheduled and seeded.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DispatchConfig {
    /// Number of independent restarts. Default: 8.
    pub nb_run: Option<usize>,
    /// Worker threads for run dispatch, 0 = one per core. Default: 0.
    pub nb_jobs: Option<usize>,
    /// Pin runs round-robin onto a logical device pool. Default: false.
    pub use_device_pool: Option<bool>,
    /// Number of devices in the pool. Default: 1.
    pub device_count: Option<usize>,
    /// Id of the first device in the pool. Default: 0.
    pub device_offset: Option<usize>,
    /// Base seed. When unset a fresh seed is drawn per prediction.
    pub seed: Option<u64>,
    /// Give both directions of a run identical random draws. Default: false.
    pub common_random_numbers: Option<bool>,
}

impl DispatchConfig {
    pub fn effective_nb_run(&self) -> usize {
        self.nb_run.unwrap_or(constants::DEFAULT_NB_RUN)
    }

    pub fn effective_nb_jobs(&self) -> usize {
        self.nb_jobs.unwrap_or(constants::DEFAULT_NB_JOBS)
    }

    pub fn effective_use_device_pool(&self) -> bool {
        self.use_device_pool.unwrap_or(false)
    }

    pub fn effective_device_count(&self) -> usize {
        self.device_count.unwrap_or(constants::DEFAULT_DEVICE_COUNT)
    }

    pub fn effective_device_offset(&self) -> usize {
        self.device_offset.unwrap_or(constants::DEFAULT_DEVICE_OFFSET)
    }

    pub fn effective_common_random_numbers(&self) -> bool {
        self.common_random_numbers.unwrap_or(false)
    }
}
