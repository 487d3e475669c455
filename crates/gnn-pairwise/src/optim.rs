//! Adam optimizer over a [`ParameterSet`].
//!
//! Bias-corrected first and second moments, one moment pair per parameter
//! tensor. Each model instance gets its own optimizer.

use gnn_core::constants::{ADAM_BETA1, ADAM_BETA2, ADAM_EPSILON};
use ndarray::{Array, Dimension, Zip};

use crate::model::ParameterSet;

/// Adam state for one model.
#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    step: i32,
    m: ParameterSet,
    v: ParameterSet,
}

impl Adam {
    /// Optimizer with zeroed moments shaped like `params`.
    pub fn new(learning_rate: f64, params: &ParameterSet) -> Self {
        let hidden_width = params.hidden_width();
        Self {
            learning_rate,
            beta1: ADAM_BETA1,
            beta2: ADAM_BETA2,
            epsilon: ADAM_EPSILON,
            step: 0,
            m: ParameterSet::zeros(hidden_width),
            v: ParameterSet::zeros(hidden_width),
        }
    }

    pub fn steps_taken(&self) -> u64 {
        self.step as u64
    }

    /// Apply one update to `params` from `grads`.
    pub fn step(&mut self, params: &mut ParameterSet, grads: &ParameterSet) {
        self.step = self.step.saturating_add(1);
        let hyper = StepHyper {
            lr: self.learning_rate,
            beta1: self.beta1,
            beta2: self.beta2,
            epsilon: self.epsilon,
            bias1: 1.0 - self.beta1.powi(self.step),
            bias2: 1.0 - self.beta2.powi(self.step),
        };

        update(&mut params.w_in, &grads.w_in, &mut self.m.w_in, &mut self.v.w_in, &hyper);
        update(&mut params.b_in, &grads.b_in, &mut self.m.b_in, &mut self.v.b_in, &hyper);
        update(&mut params.w_out, &grads.w_out, &mut self.m.w_out, &mut self.v.w_out, &hyper);
        update(&mut params.b_out, &grads.b_out, &mut self.m.b_out, &mut self.v.b_out, &hyper);
    }
}

struct StepHyper {
    lr: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    bias1: f64,
    bias2: f64,
}

fn update<D: Dimension>(
    param: &mut Array<f64, D>,
    grad: &Array<f64, D>,
    m: &mut Array<f64, D>,
    v: &mut Array<f64, D>,
    h: &StepHyper,
) {
    Zip::from(param)
        .and(grad)
        .and(m)
        .and(v)
        .for_each(|p, &g, m, v| {
            *m = h.beta1 * *m + (1.0 - h.beta1) * g;
            *v = h.beta2 * *v + (1.0 - h.beta2) * g * g;
            let m_hat = *m / h.bias1;
            let v_hat = *v / h.bias2;
            *p -= h.lr * m_hat / (v_hat.sqrt() + h.epsilon);
        });
}
