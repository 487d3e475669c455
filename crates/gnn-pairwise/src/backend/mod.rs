//! Execution backends for a single direction fit.
//!
//! A backend knows how to evaluate the MMD criterion for a model and how to
//! obtain its parameter gradients. Model construction, training, and
//! evaluation are shared and provided as default methods.

pub mod eager;
pub mod graph;

use std::fmt;
use std::str::FromStr;

use gnn_core::config::{normalize_backend, ModelConfig, TrainingConfig};
use gnn_core::BackendError;
use ndarray::{ArrayView1, ArrayView2};

use crate::mmd::MmdCriterion;
use crate::model::{GenerativeModel, ParameterSet};
use crate::rng::DirectionRng;
use crate::trainer::{self, DirectionData};

pub use eager::EagerBackend;
pub use graph::GraphBackend;

/// Capability interface every execution backend provides.
pub trait DirectionBackend: Send + Sync + fmt::Debug {
    fn kind(&self) -> BackendKind;

    /// Criterion between the model's joint sample `[cause, f(cause, noise)]`
    /// and `observed`.
    fn loss(
        &self,
        model: &GenerativeModel,
        cause: ArrayView1<'_, f64>,
        noise: ArrayView1<'_, f64>,
        observed: ArrayView2<'_, f64>,
        criterion: &MmdCriterion,
    ) -> f64;

    /// Criterion value and its gradient with respect to every parameter.
    fn loss_and_gradients(
        &self,
        model: &GenerativeModel,
        cause: ArrayView1<'_, f64>,
        noise: ArrayView1<'_, f64>,
        observed: ArrayView2<'_, f64>,
        criterion: &MmdCriterion,
    ) -> (f64, ParameterSet);

    /// A new model with freshly drawn parameters.
    fn build_model(&self, config: &ModelConfig, rng: &mut DirectionRng) -> GenerativeModel {
        GenerativeModel::new(
            config.effective_hidden_width(),
            config.effective_init_std(),
            rng,
        )
    }

    /// Fit `model` to `data`. Returns the last training loss, if any step ran.
    fn train_one_direction(
        &self,
        model: &mut GenerativeModel,
        data: &DirectionData,
        training: &TrainingConfig,
        criterion: &MmdCriterion,
        rng: &mut DirectionRng,
    ) -> Option<f64> {
        trainer::train_direction(self, model, data, training, criterion, rng)
    }

    /// Mean criterion over `eval_steps` fresh noise draws.
    fn evaluate(
        &self,
        model: &GenerativeModel,
        data: &DirectionData,
        training: &TrainingConfig,
        criterion: &MmdCriterion,
        rng: &mut DirectionRng,
    ) -> f64 {
        trainer::evaluate_direction(self, model, data, training, criterion, rng)
    }
}

/// Known backend selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Closed-form backpropagation through the fixed network.
    Eager,
    /// Recorded computation graph with reverse-mode differentiation.
    Graph,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eager => "eager",
            Self::Graph => "graph",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_backend(s).as_str() {
            "eager" => Ok(Self::Eager),
            "graph" => Ok(Self::Graph),
            _ => Err(BackendError::Unknown {
                selector: s.to_string(),
            }),
        }
    }
}

/// Resolve a selector string to a backend instance.
pub fn resolve_backend(selector: &str) -> Result<Box<dyn DirectionBackend>, BackendError> {
    Ok(match selector.parse::<BackendKind>()? {
        BackendKind::Eager => Box::new(EagerBackend),
        BackendKind::Graph => Box::new(GraphBackend),
    })
}
