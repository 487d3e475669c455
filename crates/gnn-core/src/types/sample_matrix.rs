//! N×2 paired sample: column 0 is the candidate cause, column 1 the candidate effect.

use serde::{Deserialize, Serialize};

use super::standardize::standardize_column;
use crate::errors::InputError;

/// Paired observations stored column-wise.
///
/// Invariant: both columns are non-empty, equally long, and finite.
/// Instances are immutable; `swapped` and `standardized` return new matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleMatrix {
    cause: Vec<f64>,
    effect: Vec<f64>,
}

impl SampleMatrix {
    /// Build from two flat columns.
    pub fn from_columns(cause: Vec<f64>, effect: Vec<f64>) -> Result<Self, InputError> {
        if cause.len() != effect.len() {
            return Err(InputError::LengthMismatch {
                cause_len: cause.len(),
                effect_len: effect.len(),
            });
        }
        if cause.is_empty() {
            return Err(InputError::Empty);
        }
        for (column, values) in [&cause, &effect].into_iter().enumerate() {
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                return Err(InputError::NonFinite { column, index });
            }
        }
        Ok(Self { cause, effect })
    }

    /// Build from row-shaped data (`N×k`, `k >= 2`). Only the first two
    /// columns are used.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, InputError> {
        let mut cause = Vec::with_capacity(rows.len());
        let mut effect = Vec::with_capacity(rows.len());
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() < 2 {
                return Err(InputError::TooFewColumns {
                    row,
                    columns: values.len(),
                });
            }
            cause.push(values[0]);
            effect.push(values[1]);
        }
        Self::from_columns(cause, effect)
    }

    /// Number of paired observations (N).
    pub fn len(&self) -> usize {
        self.cause.len()
    }

    /// Always false: construction rejects empty samples.
    pub fn is_empty(&self) -> bool {
        self.cause.is_empty()
    }

    pub fn cause(&self) -> &[f64] {
        &self.cause
    }

    pub fn effect(&self) -> &[f64] {
        &self.effect
    }

    /// The reversed orientation: effect becomes column 0.
    pub fn swapped(&self) -> Self {
        Self {
            cause: self.effect.clone(),
            effect: self.cause.clone(),
        }
    }

    /// Per-column zero mean, unit variance.
    pub fn standardized(&self) -> Self {
        Self {
            cause: standardize_column(&self.cause),
            effect: standardize_column(&self.effect),
        }
    }

    /// Row `i` as a `[cause, effect]` pair.
    pub fn row(&self, i: usize) -> Option<[f64; 2]> {
        Some([*self.cause.get(i)?, *self.effect.get(i)?])
    }
}
