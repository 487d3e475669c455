//! Tests for the tracing/observability setup.

use std::sync::Mutex;

use gnn_core::tracing::setup::init_tracing;

/// Serializes tests that touch `GNN_LOG`.
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_init_tracing_with_filter() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("GNN_LOG", "gnn_pairwise=debug,gnn_core=warn");
    init_tracing();
    std::env::remove_var("GNN_LOG");
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
}

#[test]
fn test_invalid_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("GNN_LOG", "===not a filter===");
    init_tracing();
    std::env::remove_var("GNN_LOG");
}
