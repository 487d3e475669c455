//! Tests for the configuration system.

use std::sync::Mutex;

use gnn_core::config::{normalize_backend, ConfigOverrides, GnnConfig};
use gnn_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all GNN_ env vars to prevent cross-test contamination.
fn clear_gnn_env_vars() {
    for key in [
        "GNN_BACKEND",
        "GNN_HIDDEN_WIDTH",
        "GNN_LEARNING_RATE",
        "GNN_TRAIN_STEPS",
        "GNN_EVAL_STEPS",
        "GNN_NB_RUN",
        "GNN_NB_JOBS",
        "GNN_USE_DEVICE_POOL",
        "GNN_DEVICE_COUNT",
        "GNN_DEVICE_OFFSET",
        "GNN_SEED",
        "GNN_INIT_STD",
        "GNN_LOG_INTERVAL",
        "GNN_COMMON_RANDOM_NUMBERS",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_empty_toml_yields_compiled_defaults() {
    let config = GnnConfig::from_toml("").unwrap();
    assert_eq!(config.effective_backend(), "eager");
    assert_eq!(config.model.effective_hidden_width(), 20);
    assert_eq!(config.model.effective_init_std(), 0.05);
    assert_eq!(config.training.effective_learning_rate(), 0.01);
    assert_eq!(config.training.effective_train_steps(), 1000);
    assert_eq!(config.training.effective_eval_steps(), 500);
    assert_eq!(config.training.effective_log_interval(), 100);
    assert_eq!(
        config.training.effective_bandwidths(),
        vec![0.01, 0.1, 1.0, 10.0, 100.0]
    );
    assert_eq!(config.dispatch.effective_nb_run(), 8);
    assert_eq!(config.dispatch.effective_nb_jobs(), 0);
    assert!(!config.dispatch.effective_use_device_pool());
    assert_eq!(config.dispatch.effective_device_count(), 1);
    assert_eq!(config.dispatch.effective_device_offset(), 0);
    assert!(config.dispatch.seed.is_none());
    assert!(!config.dispatch.effective_common_random_numbers());
}

#[test]
fn test_partial_toml_keeps_other_defaults() {
    let toml = r#"
backend = "graph"

[model]
hidden_width = 32

[dispatch]
nb_run = 4
seed = 17
"#;
    let config = GnnConfig::from_toml(toml).unwrap();
    assert_eq!(config.effective_backend(), "graph");
    assert_eq!(config.model.effective_hidden_width(), 32);
    assert_eq!(config.dispatch.effective_nb_run(), 4);
    assert_eq!(config.dispatch.seed, Some(17));
    assert_eq!(config.training.effective_train_steps(), 1000);
}

#[test]
fn test_three_layer_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_gnn_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("gnn.toml"),
        r#"
[training]
train_steps = 200
eval_steps = 50

[dispatch]
nb_run = 3
"#,
    )
    .unwrap();

    std::env::set_var("GNN_TRAIN_STEPS", "300");

    let overrides = ConfigOverrides {
        nb_run: Some(12),
        ..Default::default()
    };
    let config = GnnConfig::load(dir.path(), Some(&overrides)).unwrap();

    // Overrides beat the project file.
    assert_eq!(config.dispatch.nb_run, Some(12));
    // Env beats the project file.
    assert_eq!(config.training.train_steps, Some(300));
    // Project file beats defaults.
    assert_eq!(config.training.eval_steps, Some(50));

    clear_gnn_env_vars();
}

#[test]
fn test_load_without_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_gnn_env_vars();

    let dir = tempdir();
    let config = GnnConfig::load(dir.path(), None).unwrap();
    assert_eq!(config, GnnConfig::default());
}

#[test]
fn test_malformed_env_value_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_gnn_env_vars();

    let dir = tempdir();
    std::env::set_var("GNN_NB_RUN", "many");
    let config = GnnConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.dispatch.nb_run, None);

    clear_gnn_env_vars();
}

#[test]
fn test_invalid_toml_syntax() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_gnn_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("gnn.toml"), "not = [valid").unwrap();

    match GnnConfig::load(dir.path(), None).unwrap_err() {
        ConfigError::ParseError { path, .. } => assert!(path.ends_with("gnn.toml")),
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

#[test]
fn test_unknown_backend_rejected_by_validation() {
    let config = GnnConfig {
        backend: Some("theano".into()),
        ..Default::default()
    };
    match GnnConfig::validate(&config).unwrap_err() {
        ConfigError::InvalidValue { field, message } => {
            assert_eq!(field, "backend");
            assert!(message.contains("theano"));
        }
        other => panic!("Expected InvalidValue, got: {:?}", other),
    }
}

#[test]
fn test_validation_rejects_bad_values() {
    let cases = [
        ("[model]\nhidden_width = 0", "model.hidden_width"),
        ("[model]\ninit_std = -1.0", "model.init_std"),
        ("[training]\nlearning_rate = 0.0", "training.learning_rate"),
        ("[training]\neval_steps = 0", "training.eval_steps"),
        ("[training]\nbandwidths = [1.0, -2.0]", "training.bandwidths"),
        ("[dispatch]\nnb_run = 0", "dispatch.nb_run"),
        ("[dispatch]\ndevice_count = 0", "dispatch.device_count"),
    ];
    for (toml, expected_field) in cases {
        let config = GnnConfig::from_toml(toml).unwrap();
        match GnnConfig::validate(&config) {
            Err(ConfigError::ValidationFailed { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("{expected_field}: expected ValidationFailed, got {other:?}"),
        }
    }
}

#[test]
fn test_zero_train_steps_is_valid() {
    let config = GnnConfig::from_toml("[training]\ntrain_steps = 0").unwrap();
    assert!(GnnConfig::validate(&config).is_ok());
}

#[test]
fn test_toml_roundtrip() {
    let config = GnnConfig::from_toml(
        r#"
backend = "graph"

[training]
bandwidths = [0.5, 2.0]

[dispatch]
use_device_pool = true
device_count = 2
device_offset = 1
"#,
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let back = GnnConfig::from_toml(&text).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_merge_only_overrides_present_values() {
    let mut base = GnnConfig::from_toml("[dispatch]\nnb_run = 5\nnb_jobs = 2").unwrap();
    let other = GnnConfig::from_toml("[dispatch]\nnb_jobs = 6").unwrap();
    GnnConfig::merge(&mut base, &other);
    assert_eq!(base.dispatch.nb_run, Some(5));
    assert_eq!(base.dispatch.nb_jobs, Some(6));
}

#[test]
fn test_env_layer_covers_init_std_log_interval_and_crn() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_gnn_env_vars();

    let dir = tempdir();
    std::env::set_var("GNN_INIT_STD", "0.2");
    std::env::set_var("GNN_LOG_INTERVAL", "0");
    std::env::set_var("GNN_COMMON_RANDOM_NUMBERS", "true");
    let config = GnnConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.model.init_std, Some(0.2));
    assert_eq!(config.training.log_interval, Some(0));
    assert_eq!(config.dispatch.common_random_numbers, Some(true));

    clear_gnn_env_vars();
}

#[test]
fn test_backend_selector_is_case_and_space_insensitive() {
    assert_eq!(normalize_backend(" Graph "), "graph");
    for selector in ["Graph", " eager ", "EAGER"] {
        let config = GnnConfig {
            backend: Some(selector.into()),
            ..Default::default()
        };
        assert!(GnnConfig::validate(&config).is_ok(), "{selector:?}");
    }
}
