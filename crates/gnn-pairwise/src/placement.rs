//! Where a run executes.
//!
//! A run closure is handed to a [`Placement`] together with its run index.
//! The host placement runs it on the calling worker. The device pool pins
//! run `i` to device `offset + i % count`, each device being a dedicated
//! single-thread executor.

use gnn_core::PredictError;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

/// Executes run closures on the resource assigned to each run.
pub trait Placement: Send + Sync {
    /// Device id run `run` is pinned to, if placement is device based.
    fn device_for_run(&self, run: usize) -> Option<usize>;

    /// Execute `f` for `run` and return its value.
    fn install<R, F>(&self, run: usize, f: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send;
}

/// Runs every closure on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlacement;

impl Placement for HostPlacement {
    fn device_for_run(&self, _run: usize) -> Option<usize> {
        None
    }

    fn install<R, F>(&self, _run: usize, f: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        f()
    }
}

/// Logical device pool: one single-thread executor per device id in
/// `offset..offset + count`.
pub struct DevicePool {
    offset: usize,
    devices: Vec<ThreadPool>,
}

impl DevicePool {
    pub fn new(offset: usize, count: usize) -> Result<Self, PredictError> {
        if count == 0 {
            return Err(PredictError::WorkerPool {
                message: "device pool needs at least one device".to_string(),
            });
        }
        let devices = (offset..offset + count)
            .map(|id| {
                ThreadPoolBuilder::new()
                    .num_threads(1)
                    .thread_name(move |_| format!("gnn-device-{id}"))
                    .build()
                    .map_err(|e| PredictError::WorkerPool {
                        message: format!("device {id}: {e}"),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(offset, count, "device pool ready");
        Ok(Self { offset, devices })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }
}

impl std::fmt::Debug for DevicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevicePool")
            .field("offset", &self.offset)
            .field("count", &self.devices.len())
            .finish()
    }
}

impl Placement for DevicePool {
    fn device_for_run(&self, run: usize) -> Option<usize> {
        Some(self.offset + run % self.devices.len())
    }

    fn install<R, F>(&self, run: usize, f: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        self.devices[run % self.devices.len()].install(f)
    }
}

/// Placement chosen from the dispatch configuration.
#[derive(Debug)]
pub enum RunPlacement {
    Host(HostPlacement),
    Devices(DevicePool),
}

impl RunPlacement {
    pub fn from_config(dispatch: &gnn_core::config::DispatchConfig) -> Result<Self, PredictError> {
        if dispatch.effective_use_device_pool() {
            Ok(Self::Devices(DevicePool::new(
                dispatch.effective_device_offset(),
                dispatch.effective_device_count(),
            )?))
        } else {
            Ok(Self::Host(HostPlacement))
        }
    }
}

impl Placement for RunPlacement {
    fn device_for_run(&self, run: usize) -> Option<usize> {
        match self {
            Self::Host(p) => p.device_for_run(run),
            Self::Devices(p) => p.device_for_run(run),
        }
    }

    fn install<R, F>(&self, run: usize, f: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match self {
            Self::Host(p) => p.install(run, f),
            Self::Devices(p) => p.install(run, f),
        }
    }
}
