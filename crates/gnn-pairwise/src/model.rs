//! Generative direction model: `(cause, noise) -> predicted effect`.
//!
//! One hidden layer of width H with ReLU, linear output of width 1.
//! The forward pass caches the activations the backward pass needs.

use ndarray::{Array1, Array2, ArrayView1, Axis, Zip};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::mmd::joint_sample;

/// Trainable parameters. Also used as the gradient and optimizer-moment
/// container, since those share the parameter shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    /// Input-to-hidden weights, `2×H`.
    pub w_in: Array2<f64>,
    /// Hidden bias, `H`.
    pub b_in: Array1<f64>,
    /// Hidden-to-output weights, `H×1`.
    pub w_out: Array2<f64>,
    /// Output bias, `1`.
    pub b_out: Array1<f64>,
}

impl ParameterSet {
    pub fn zeros(hidden_width: usize) -> Self {
        Self {
            w_in: Array2::zeros((2, hidden_width)),
            b_in: Array1::zeros(hidden_width),
            w_out: Array2::zeros((hidden_width, 1)),
            b_out: Array1::zeros(1),
        }
    }

    /// Every entry drawn independently from `Normal(0, init_std)`.
    pub fn random<R: Rng + ?Sized>(hidden_width: usize, init_std: f64, rng: &mut R) -> Self {
        let mut draw = || init_std * rng.sample::<f64, _>(StandardNormal);
        Self {
            w_in: Array2::from_shape_simple_fn((2, hidden_width), &mut draw),
            b_in: Array1::from_shape_simple_fn(hidden_width, &mut draw),
            w_out: Array2::from_shape_simple_fn((hidden_width, 1), &mut draw),
            b_out: Array1::from_shape_simple_fn(1, &mut draw),
        }
    }

    pub fn hidden_width(&self) -> usize {
        self.b_in.len()
    }

    /// Total number of scalar parameters.
    pub fn len(&self) -> usize {
        self.w_in.len() + self.b_in.len() + self.w_out.len() + self.b_out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_finite(&self) -> bool {
        self.values().all(|v| v.is_finite())
    }

    /// Largest absolute element-wise difference to `other`.
    pub fn max_abs_diff(&self, other: &ParameterSet) -> f64 {
        self.values()
            .zip(other.values())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.w_in
            .iter()
            .chain(self.b_in.iter())
            .chain(self.w_out.iter())
            .chain(self.b_out.iter())
            .copied()
    }
}

/// Activations cached by [`GenerativeModel::forward_pass`].
#[derive(Debug, Clone)]
pub struct ForwardPass {
    /// `[cause, noise]`, `N×2`.
    pub input: Array2<f64>,
    /// Hidden pre-activation, `N×H`.
    pub pre_activation: Array2<f64>,
    /// ReLU output, `N×H`.
    pub hidden: Array2<f64>,
    /// Predicted effect, `N`.
    pub output: Array1<f64>,
}

/// A single-hidden-layer generative network owned by one (direction, run).
#[derive(Debug, Clone)]
pub struct GenerativeModel {
    params: ParameterSet,
}

impl GenerativeModel {
    /// Fresh, randomly initialized parameters. Nothing is shared with any
    /// other instance.
    pub fn new<R: Rng + ?Sized>(hidden_width: usize, init_std: f64, rng: &mut R) -> Self {
        Self {
            params: ParameterSet::random(hidden_width, init_std, rng),
        }
    }

    pub fn from_parameters(params: ParameterSet) -> Self {
        Self { params }
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    pub fn parameters_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }

    pub fn hidden_width(&self) -> usize {
        self.params.hidden_width()
    }

    /// Predicted effect column for `cause` and a noise draw of the same length.
    pub fn forward(&self, cause: ArrayView1<'_, f64>, noise: ArrayView1<'_, f64>) -> Array1<f64> {
        self.forward_pass(cause, noise).output
    }

    pub fn forward_pass(
        &self,
        cause: ArrayView1<'_, f64>,
        noise: ArrayView1<'_, f64>,
    ) -> ForwardPass {
        let input = joint_sample(cause, noise);
        let pre_activation = input.dot(&self.params.w_in) + &self.params.b_in;
        let hidden = pre_activation.mapv(|v| v.max(0.0));
        let b_out = self.params.b_out[0];
        let output = hidden.dot(&self.params.w_out).column(0).mapv(|v| v + b_out);
        ForwardPass {
            input,
            pre_activation,
            hidden,
            output,
        }
    }

    /// Parameter gradients given `∂loss/∂output` for a cached pass.
    pub fn backward(&self, pass: &ForwardPass, grad_output: ArrayView1<'_, f64>) -> ParameterSet {
        let g = grad_output.insert_axis(Axis(1));

        let w_out = pass.hidden.t().dot(&g);
        let b_out = Array1::from_elem(1, grad_output.sum());

        let mut d_pre = g.dot(&self.params.w_out.t());
        Zip::from(&mut d_pre)
            .and(&pass.pre_activation)
            .for_each(|d, &p| {
                if p <= 0.0 {
                    *d = 0.0;
                }
            });

        let w_in = pass.input.t().dot(&d_pre);
        let b_in = d_pre.sum_axis(Axis(0));

        ParameterSet {
            w_in,
            b_in,
            w_out,
            b_out,
        }
    }
}

/// `n` independent standard-normal draws.
pub fn sample_noise<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Array1<f64> {
    Array1::from_shape_simple_fn(n, || rng.sample::<f64, _>(StandardNormal))
}
