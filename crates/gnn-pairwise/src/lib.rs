//! # gnn-pairwise
//!
//! Pairwise causal-direction scoring with generative neural networks.
//!
//! For a pair of columns (A, B) the scorer fits, over several independent
//! runs, one network generating B from A and one generating A from B, and
//! compares how closely each reproduces the observed joint distribution
//! under a multi-bandwidth MMD criterion.

pub mod aggregate;
pub mod backend;
pub mod dispatch;
pub mod mmd;
pub mod model;
pub mod optim;
pub mod placement;
pub mod predictor;
pub mod rng;
pub mod trainer;

pub use aggregate::{DirectionMeans, RunResult};
pub use backend::{resolve_backend, BackendKind, DirectionBackend};
pub use predictor::{predict_preference, PairPrediction, PairwiseGnn};
