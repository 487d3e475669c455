//! Per-column standardization via `statrs`.
//!
//! Population mean and standard deviation (divisor N). Columns with zero
//! variance are centred only, so a constant column becomes all zeros.

use statrs::statistics::Statistics;

/// Rescale `values` to zero mean and unit population variance.
pub fn standardize_column(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let mean = values.iter().mean();
    let std = values.iter().population_std_dev();
    let scale = if std > 0.0 && std.is_finite() { std } else { 1.0 };
    values.iter().map(|v| (v - mean) / scale).collect()
}
