//! Eager and graph backends must agree on losses, gradients, and fits.

use gnn_core::config::TrainingConfig;
use gnn_core::constants::DEFAULT_BANDWIDTHS;
use gnn_core::SampleMatrix;
use gnn_pairwise::backend::{BackendKind, DirectionBackend, EagerBackend, GraphBackend};
use gnn_pairwise::mmd::MmdCriterion;
use gnn_pairwise::model::{sample_noise, GenerativeModel};
use gnn_pairwise::rng::direction_rng;
use gnn_pairwise::trainer::DirectionData;

fn data() -> DirectionData {
    let cause: Vec<f64> = (0..16).map(|i| (i as f64 * 0.7).sin()).collect();
    let effect: Vec<f64> = cause.iter().map(|x| 0.8 * x * x - 0.3).collect();
    DirectionData::new(&SampleMatrix::from_columns(cause, effect).unwrap())
}

fn criterion() -> MmdCriterion {
    MmdCriterion::new(DEFAULT_BANDWIDTHS.to_vec())
}

#[test]
fn test_backends_report_their_kind() {
    assert_eq!(EagerBackend.kind(), BackendKind::Eager);
    assert_eq!(GraphBackend.kind(), BackendKind::Graph);
}

#[test]
fn test_loss_and_gradients_agree() {
    let d = data();
    let mut rng = direction_rng(21, 0);
    // Wide init so a fair share of hidden units is active.
    let model = GenerativeModel::new(8, 0.7, &mut rng);
    let noise = sample_noise(d.len(), &mut rng);
    let c = criterion();

    let (eager_loss, eager_grads) = EagerBackend.loss_and_gradients(
        &model,
        d.cause().view(),
        noise.view(),
        d.observed().view(),
        &c,
    );
    let (graph_loss, graph_grads) = GraphBackend.loss_and_gradients(
        &model,
        d.cause().view(),
        noise.view(),
        d.observed().view(),
        &c,
    );

    assert!((eager_loss - graph_loss).abs() < 1e-12);
    assert_eq!(eager_grads.hidden_width(), graph_grads.hidden_width());
    assert!(
        eager_grads.max_abs_diff(&graph_grads) < 1e-9,
        "gradient mismatch {}",
        eager_grads.max_abs_diff(&graph_grads)
    );
    assert!(eager_grads.max_abs_diff(&gnn_pairwise::model::ParameterSet::zeros(8)) > 0.0);
}

#[test]
fn test_loss_matches_loss_and_gradients() {
    let d = data();
    let mut rng = direction_rng(5, 3);
    let model = GenerativeModel::new(6, 0.3, &mut rng);
    let noise = sample_noise(d.len(), &mut rng);
    let c = criterion();

    for backend in [&EagerBackend as &dyn DirectionBackend, &GraphBackend] {
        let plain = backend.loss(&model, d.cause().view(), noise.view(), d.observed().view(), &c);
        let (with_grad, _) =
            backend.loss_and_gradients(&model, d.cause().view(), noise.view(), d.observed().view(), &c);
        assert!((plain - with_grad).abs() < 1e-12, "{}", backend.kind());
    }
}

#[test]
fn test_fitted_scores_agree() {
    let d = data();
    let c = criterion();
    let training = TrainingConfig {
        learning_rate: Some(0.02),
        train_steps: Some(25),
        eval_steps: Some(5),
        log_interval: Some(0),
        bandwidths: Vec::new(),
    };
    let model_config = gnn_core::config::ModelConfig {
        hidden_width: Some(6),
        init_std: Some(0.2),
    };

    let score = |backend: &dyn DirectionBackend| {
        let mut rng = direction_rng(77, 4);
        let mut model = backend.build_model(&model_config, &mut rng);
        backend.train_one_direction(&mut model, &d, &training, &c, &mut rng);
        backend.evaluate(&model, &d, &training, &c, &mut rng)
    };

    let eager = score(&EagerBackend);
    let graph = score(&GraphBackend);
    assert!(eager.is_finite());
    assert!((eager - graph).abs() < 1e-8, "eager {eager} vs graph {graph}");
}
