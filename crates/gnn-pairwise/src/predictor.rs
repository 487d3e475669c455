//! Pair-level prediction entry points.

use gnn_core::config::GnnConfig;
use gnn_core::errors::PredictResult;
use gnn_core::{predict_span, Direction, Preference, SampleMatrix};
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate::{aggregate, DirectionMeans, RunResult};
use crate::backend::{resolve_backend, BackendKind, DirectionBackend};
use crate::dispatch::{PairData, RunDispatcher};
use crate::placement::RunPlacement;
use crate::rng::fresh_seed;

/// Outcome of scoring one pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairPrediction {
    /// Position of the pair in its dataset, 0 for single predictions.
    pub pair: usize,
    pub preference: f64,
    pub means: DirectionMeans,
    pub runs: Vec<RunResult>,
    /// Base seed every run stream was derived from.
    pub seed: u64,
}

impl PairPrediction {
    pub fn preference(&self) -> Preference {
        Preference(self.preference)
    }

    /// The favoured direction, `None` on an exact tie.
    pub fn direction(&self) -> Option<Direction> {
        self.preference().direction()
    }
}

/// Pairwise causal-direction scorer.
///
/// Holds a validated configuration, its resolved backend, and the run
/// placement (device executors are built once and reused across pairs).
/// Every call builds new models; nothing learned is kept between predictions.
#[derive(Debug)]
pub struct PairwiseGnn {
    config: GnnConfig,
    backend: Box<dyn DirectionBackend>,
    placement: RunPlacement,
}

impl PairwiseGnn {
    /// Resolve the backend named by `config` and validate the rest.
    pub fn new(config: GnnConfig) -> PredictResult<Self> {
        let backend = resolve_backend(config.effective_backend())?;
        GnnConfig::validate(&config)?;
        let placement = RunPlacement::from_config(&config.dispatch)?;
        Ok(Self {
            config,
            backend,
            placement,
        })
    }

    pub fn config(&self) -> &GnnConfig {
        &self.config
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn placement(&self) -> &RunPlacement {
        &self.placement
    }

    /// Signed preference for `cause → effect` over the reverse.
    pub fn predict_preference(&self, cause: &[f64], effect: &[f64]) -> PredictResult<Preference> {
        Ok(self.predict_detailed(cause, effect)?.preference())
    }

    /// Preference together with per-run scores and the seed used.
    pub fn predict_detailed(&self, cause: &[f64], effect: &[f64]) -> PredictResult<PairPrediction> {
        let matrix = SampleMatrix::from_columns(cause.to_vec(), effect.to_vec())?;
        self.predict_matrix(0, &matrix)
    }

    /// Score an already validated pair.
    pub fn predict_matrix(&self, pair: usize, matrix: &SampleMatrix) -> PredictResult<PairPrediction> {
        let seed = self.config.dispatch.seed.unwrap_or_else(fresh_seed);
        let span = predict_span!(pair, seed, self.backend.kind());
        let _guard = span.enter();
        debug!(samples = matrix.len(), "scoring pair");

        let data = PairData::new(&matrix.standardized());
        let dispatcher =
            RunDispatcher::new(self.backend.as_ref(), &self.placement, &self.config, seed);
        let runs = dispatcher.run_all(&data)?;
        let (means, preference) = aggregate(&runs)?;

        info!(
            preference = preference.value(),
            mean_ab = means.mean_ab,
            mean_ba = means.mean_ba,
            "pair scored"
        );
        Ok(PairPrediction {
            pair,
            preference: preference.value(),
            means,
            runs,
            seed,
        })
    }

    /// Score each pair in order. Stops at the first failing pair.
    pub fn predict_dataset(&self, pairs: &[SampleMatrix]) -> PredictResult<Vec<PairPrediction>> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, matrix)| self.predict_matrix(i, matrix))
            .collect()
    }
}

/// One-shot scoring with an explicit backend selector.
///
/// `backend` overrides whatever selector `config` carries.
pub fn predict_preference(
    cause: &[f64],
    effect: &[f64],
    backend: &str,
    config: &GnnConfig,
) -> PredictResult<Preference> {
    let mut config = config.clone();
    config.backend = Some(backend.to_string());
    PairwiseGnn::new(config)?.predict_preference(cause, effect)
}
