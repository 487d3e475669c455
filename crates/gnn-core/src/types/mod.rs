//! Sample and result types shared across the workspace.

pub mod direction;
pub mod sample_matrix;
pub mod standardize;

pub use direction::{Direction, Preference};
pub use sample_matrix::SampleMatrix;
pub use standardize::standardize_column;
