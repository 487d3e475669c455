//! Dual-direction runs and their parallel dispatch.
//!
//! A run fits two fresh models, one per orientation, and scores each.
//! The reversed orientation always trains on the column-swapped matrix.

use gnn_core::config::GnnConfig;
use gnn_core::{direction_span, run_span, Direction, PredictError, SampleMatrix};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, trace};

use crate::aggregate::RunResult;
use crate::backend::DirectionBackend;
use crate::mmd::MmdCriterion;
use crate::placement::Placement;
use crate::rng::{direction_rng, stream_for};
use crate::trainer::DirectionData;

/// Both orientations of a standardized pair, built once per prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct PairData {
    forward: DirectionData,
    reverse: DirectionData,
}

impl PairData {
    pub fn new(matrix: &SampleMatrix) -> Self {
        Self {
            forward: DirectionData::new(matrix),
            reverse: DirectionData::new(&matrix.swapped()),
        }
    }

    pub fn for_direction(&self, direction: Direction) -> &DirectionData {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Reverse => &self.reverse,
        }
    }
}

/// Executes runs for one pair under a fixed base seed.
pub struct RunDispatcher<'a, B: ?Sized, P> {
    backend: &'a B,
    placement: &'a P,
    config: &'a GnnConfig,
    criterion: MmdCriterion,
    seed: u64,
}

impl<'a, B, P> RunDispatcher<'a, B, P>
where
    B: DirectionBackend + ?Sized,
    P: Placement,
{
    pub fn new(backend: &'a B, placement: &'a P, config: &'a GnnConfig, seed: u64) -> Self {
        Self {
            backend,
            placement,
            config,
            criterion: MmdCriterion::new(config.training.effective_bandwidths()),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Score both directions of `run` on the run's assigned placement.
    pub fn run(&self, run: usize, data: &PairData) -> RunResult {
        let device = self.placement.device_for_run(run);
        self.placement.install(run, || {
            let span = run_span!(run, device);
            // Both halves may land on different workers; each re-enters the span.
            let (score_ab, score_ba) = rayon::join(
                || span.in_scope(|| self.score_direction(run, Direction::Forward, data)),
                || span.in_scope(|| self.score_direction(run, Direction::Reverse, data)),
            );
            span.in_scope(|| debug!(score_ab, score_ba, "run complete"));
            RunResult {
                run,
                device,
                score_ab,
                score_ba,
            }
        })
    }

    /// Train a fresh model for `direction` and return its evaluation score.
    pub fn score_direction(&self, run: usize, direction: Direction, data: &PairData) -> f64 {
        let _span = direction_span!(direction).entered();
        let crn = self.config.dispatch.effective_common_random_numbers();
        let mut rng = direction_rng(self.seed, stream_for(run, direction, crn));
        let oriented = data.for_direction(direction);

        let mut model = self.backend.build_model(&self.config.model, &mut rng);
        let last = self.backend.train_one_direction(
            &mut model,
            oriented,
            &self.config.training,
            &self.criterion,
            &mut rng,
        );
        trace!(?last, "training finished");
        self.backend
            .evaluate(&model, oriented, &self.config.training, &self.criterion, &mut rng)
    }

    /// All `nb_run` runs, one after another.
    pub fn run_all_sequential(&self, data: &PairData) -> Vec<RunResult> {
        (0..self.config.dispatch.effective_nb_run())
            .map(|run| self.run(run, data))
            .collect()
    }

    /// All `nb_run` runs on a worker pool of `nb_jobs` threads (0 = one per
    /// core). Results are ordered by run index.
    pub fn run_all_parallel(&self, data: &PairData) -> Result<Vec<RunResult>, PredictError> {
        let nb_run = self.config.dispatch.effective_nb_run();
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.dispatch.effective_nb_jobs())
            .thread_name(|i| format!("gnn-worker-{i}"))
            .build()
            .map_err(|e| PredictError::WorkerPool {
                message: e.to_string(),
            })?;
        Ok(pool.install(|| {
            (0..nb_run)
                .into_par_iter()
                .map(|run| self.run(run, data))
                .collect()
        }))
    }

    /// Parallel unless `nb_jobs` is 1.
    pub fn run_all(&self, data: &PairData) -> Result<Vec<RunResult>, PredictError> {
        if self.config.dispatch.effective_nb_jobs() == 1 {
            Ok(self.run_all_sequential(data))
        } else {
            self.run_all_parallel(data)
        }
    }
}
