//! Training and evaluation of one direction model.
//!
//! Each step draws fresh noise, evaluates the criterion against the observed
//! joint sample and, during training, applies one Adam update.

use gnn_core::config::TrainingConfig;
use gnn_core::SampleMatrix;
use ndarray::{Array1, Array2};
use tracing::debug;

use crate::backend::DirectionBackend;
use crate::mmd::{joint_sample, MmdCriterion};
use crate::model::{sample_noise, GenerativeModel};
use crate::optim::Adam;
use crate::rng::DirectionRng;

/// Observed data for one orientation: the cause column and the joint sample
/// `[cause, effect]` the model is fit against.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionData {
    cause: Array1<f64>,
    observed: Array2<f64>,
}

impl DirectionData {
    /// Column 0 of `matrix` is treated as the cause.
    pub fn new(matrix: &SampleMatrix) -> Self {
        let cause = Array1::from_vec(matrix.cause().to_vec());
        let effect = Array1::from_vec(matrix.effect().to_vec());
        let observed = joint_sample(cause.view(), effect.view());
        Self { cause, observed }
    }

    pub fn len(&self) -> usize {
        self.cause.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cause.is_empty()
    }

    pub fn cause(&self) -> &Array1<f64> {
        &self.cause
    }

    pub fn observed(&self) -> &Array2<f64> {
        &self.observed
    }
}

/// Fit `model` for `train_steps` Adam updates. Returns the last loss seen.
pub fn train_direction<B: DirectionBackend + ?Sized>(
    backend: &B,
    model: &mut GenerativeModel,
    data: &DirectionData,
    training: &TrainingConfig,
    criterion: &MmdCriterion,
    rng: &mut DirectionRng,
) -> Option<f64> {
    let steps = training.effective_train_steps();
    let log_interval = training.effective_log_interval();
    let mut optimizer = Adam::new(training.effective_learning_rate(), model.parameters());
    let mut last = None;

    for step in 0..steps {
        let noise = sample_noise(data.len(), rng);
        let (loss, grads) = backend.loss_and_gradients(
            model,
            data.cause.view(),
            noise.view(),
            data.observed.view(),
            criterion,
        );
        optimizer.step(model.parameters_mut(), &grads);
        last = Some(loss);

        if log_interval > 0 && step % log_interval == 0 {
            debug!(step, loss, "train");
        }
    }

    last
}

/// Mean criterion over `eval_steps` noise draws, without parameter updates.
pub fn evaluate_direction<B: DirectionBackend + ?Sized>(
    backend: &B,
    model: &GenerativeModel,
    data: &DirectionData,
    training: &TrainingConfig,
    criterion: &MmdCriterion,
    rng: &mut DirectionRng,
) -> f64 {
    let steps = training.effective_eval_steps();
    let log_interval = training.effective_log_interval();
    let mut total = 0.0;

    for step in 0..steps {
        let noise = sample_noise(data.len(), rng);
        let loss = backend.loss(
            model,
            data.cause.view(),
            noise.view(),
            data.observed.view(),
            criterion,
        );
        total += loss;

        if log_interval > 0 && step % log_interval == 0 {
            debug!(step, loss, "eval");
        }
    }

    total / steps as f64
}
