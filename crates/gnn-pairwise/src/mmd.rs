//! Multi-bandwidth Gaussian-kernel MMD between two joint samples.
//!
//! With `Z = [G; O]` stacked row-wise and weights `s_i = 1/N` for generated
//! rows, `-1/M` for observed rows:
//!
//! `loss = Σ_a Σ_b s_a s_b Σ_σ exp(-σ‖z_a − z_b‖²)`
//!
//! This is the biased (V-statistic) squared MMD, non-negative up to rounding.

use ndarray::{Array2, ArrayView1, ArrayView2};

/// Distributional-distance criterion used for training and evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct MmdCriterion {
    bandwidths: Vec<f64>,
}

impl MmdCriterion {
    pub fn new(bandwidths: Vec<f64>) -> Self {
        Self { bandwidths }
    }

    pub fn bandwidths(&self) -> &[f64] {
        &self.bandwidths
    }

    /// Criterion value between `generated` and `observed`.
    pub fn loss(&self, generated: ArrayView2<'_, f64>, observed: ArrayView2<'_, f64>) -> f64 {
        self.accumulate(generated, observed, None)
    }

    /// Criterion value and its gradient with respect to each row of `generated`.
    pub fn loss_and_grad(
        &self,
        generated: ArrayView2<'_, f64>,
        observed: ArrayView2<'_, f64>,
    ) -> (f64, Array2<f64>) {
        let mut grad = Array2::zeros(generated.raw_dim());
        let loss = self.accumulate(generated, observed, Some(&mut grad));
        (loss, grad)
    }

    fn accumulate(
        &self,
        generated: ArrayView2<'_, f64>,
        observed: ArrayView2<'_, f64>,
        mut grad: Option<&mut Array2<f64>>,
    ) -> f64 {
        let n = generated.nrows();
        let m = observed.nrows();
        let dim = generated.ncols();
        debug_assert!(n > 0 && m > 0, "MMD needs non-empty samples");
        debug_assert_eq!(dim, observed.ncols());

        let total = n + m;
        let weight = |i: usize| {
            if i < n {
                1.0 / n as f64
            } else {
                -1.0 / m as f64
            }
        };
        let row = |i: usize| {
            if i < n {
                generated.row(i)
            } else {
                observed.row(i - n)
            }
        };
        // exp(0) once per bandwidth on the diagonal.
        let self_kernel = self.bandwidths.len() as f64;

        let mut loss = 0.0;
        for a in 0..total {
            let sa = weight(a);
            let za = row(a);
            loss += sa * sa * self_kernel;
            for b in (a + 1)..total {
                let sb = weight(b);
                let zb = row(b);
                let d2 = squared_distance(za, zb);
                let (k, dk) = self.kernel(d2);
                loss += 2.0 * sa * sb * k;

                if let Some(g) = grad.as_deref_mut() {
                    let coef = -4.0 * sa * sb * dk;
                    for c in 0..dim {
                        let diff = coef * (za[c] - zb[c]);
                        if a < n {
                            g[[a, c]] += diff;
                        }
                        if b < n {
                            g[[b, c]] -= diff;
                        }
                    }
                }
            }
        }
        loss
    }

    /// Returns `(Σ_σ e^{-σ d²}, Σ_σ σ e^{-σ d²})`.
    #[inline]
    fn kernel(&self, d2: f64) -> (f64, f64) {
        let mut k = 0.0;
        let mut dk = 0.0;
        for &sigma in &self.bandwidths {
            let e = (-sigma * d2).exp();
            k += e;
            dk += sigma * e;
        }
        (k, dk)
    }
}

#[inline]
fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Stack two equally long columns into an `N×2` joint sample.
pub fn joint_sample(first: ArrayView1<'_, f64>, second: ArrayView1<'_, f64>) -> Array2<f64> {
    debug_assert_eq!(first.len(), second.len());
    Array2::from_shape_fn((first.len(), 2), |(i, j)| {
        if j == 0 {
            first[i]
        } else {
            second[i]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gnn_core::constants::DEFAULT_BANDWIDTHS;
    use ndarray::{array, Array1};

    fn criterion() -> MmdCriterion {
        MmdCriterion::new(DEFAULT_BANDWIDTHS.to_vec())
    }

    fn sample(offset: f64) -> Array2<f64> {
        Array2::from_shape_fn((12, 2), |(i, j)| {
            (i as f64 * 0.37 + j as f64 * 1.3).sin() + offset
        })
    }

    #[test]
    fn test_identical_samples_have_zero_distance() {
        let s = sample(0.0);
        let loss = criterion().loss(s.view(), s.view());
        assert!(loss.abs() < 1e-12, "loss = {loss}");
    }

    #[test]
    fn test_distance_grows_with_shift() {
        let base = sample(0.0);
        let near = criterion().loss(sample(0.1).view(), base.view());
        let far = criterion().loss(sample(1.5).view(), base.view());
        assert!(near > 0.0);
        assert!(far > near);
    }

    #[test]
    fn test_loss_is_symmetric() {
        let a = sample(0.0);
        let b = sample(0.4);
        let ab = criterion().loss(a.view(), b.view());
        let ba = criterion().loss(b.view(), a.view());
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn test_loss_and_grad_matches_loss() {
        let g = sample(0.3);
        let o = sample(0.0);
        let c = criterion();
        let (loss, _) = c.loss_and_grad(g.view(), o.view());
        assert_eq!(loss, c.loss(g.view(), o.view()));
    }

    #[test]
    fn test_gradient_matches_finite_differences() {
        let c = criterion();
        let g = sample(0.2);
        let o = sample(-0.1);
        let (_, grad) = c.loss_and_grad(g.view(), o.view());
        let h = 1e-6;
        for &(i, j) in &[(0usize, 0usize), (3, 1), (7, 0), (11, 1)] {
            let mut plus = g.clone();
            plus[[i, j]] += h;
            let mut minus = g.clone();
            minus[[i, j]] -= h;
            let numeric = (c.loss(plus.view(), o.view()) - c.loss(minus.view(), o.view())) / (2.0 * h);
            assert!(
                (numeric - grad[[i, j]]).abs() < 1e-6,
                "({i},{j}): numeric {numeric} vs analytic {}",
                grad[[i, j]]
            );
        }
    }

    #[test]
    fn test_joint_sample_layout() {
        let a: Array1<f64> = array![1.0, 2.0];
        let b: Array1<f64> = array![3.0, 4.0];
        let j = joint_sample(a.view(), b.view());
        assert_eq!(j, array![[1.0, 3.0], [2.0, 4.0]]);
    }
}
