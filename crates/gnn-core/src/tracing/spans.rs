//! Span definitions per operation: prediction, run, direction fit.
//!
//! Each span carries the identifiers needed to correlate progress lines
//! emitted concurrently from worker threads.

/// Create a pair-prediction span.
#[macro_export]
macro_rules! predict_span {
    ($pair:expr, $seed:expr, $backend:expr) => {
        tracing::info_span!("gnn.predict", pair = $pair, seed = $seed, backend = %$backend)
    };
}

/// Create a run span.
#[macro_export]
macro_rules! run_span {
    ($run:expr, $device:expr) => {
        tracing::debug_span!("gnn.run", run = $run, device = ?$device)
    };
}

/// Create a direction-fit span.
#[macro_export]
macro_rules! direction_span {
    ($direction:expr) => {
        tracing::debug_span!("gnn.direction", direction = %$direction)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PREDICT: &str = "gnn.predict";
    pub const RUN: &str = "gnn.run";
    pub const DIRECTION: &str = "gnn.direction";
}
