//! Eager backend: forward pass, MMD gradient, closed-form backward pass.

use ndarray::{ArrayView1, ArrayView2};

use super::{BackendKind, DirectionBackend};
use crate::mmd::{joint_sample, MmdCriterion};
use crate::model::{GenerativeModel, ParameterSet};

#[derive(Debug, Clone, Copy, Default)]
pub struct EagerBackend;

impl DirectionBackend for EagerBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Eager
    }

    fn loss(
        &self,
        model: &GenerativeModel,
        cause: ArrayView1<'_, f64>,
        noise: ArrayView1<'_, f64>,
        observed: ArrayView2<'_, f64>,
        criterion: &MmdCriterion,
    ) -> f64 {
        let predicted = model.forward(cause, noise);
        let generated = joint_sample(cause, predicted.view());
        criterion.loss(generated.view(), observed)
    }

    fn loss_and_gradients(
        &self,
        model: &GenerativeModel,
        cause: ArrayView1<'_, f64>,
        noise: ArrayView1<'_, f64>,
        observed: ArrayView2<'_, f64>,
        criterion: &MmdCriterion,
    ) -> (f64, ParameterSet) {
        let pass = model.forward_pass(cause, noise);
        let generated = joint_sample(cause, pass.output.view());
        let (loss, grad_generated) = criterion.loss_and_grad(generated.view(), observed);
        // Column 0 is the observed cause and carries no parameter dependence.
        let grads = model.backward(&pass, grad_generated.column(1));
        (loss, grads)
    }
}
