//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when `GNN_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "gnn_core=info,gnn_pairwise=info";

/// Initialize the tracing/logging system.
///
/// Reads the `GNN_LOG` environment variable for per-crate log levels.
/// Format: `GNN_LOG=gnn_pairwise=debug,gnn_core=warn`
///
/// Falls back to [`DEFAULT_FILTER`] if `GNN_LOG` is not set or is invalid.
///
/// Idempotent. A subscriber installed elsewhere first is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("GNN_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
