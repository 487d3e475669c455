//! Per-direction random streams.
//!
//! Every (run, direction) draws initial parameters and noise from its own
//! `ChaCha8Rng`, keyed by the prediction's base seed and a stream number.
//! Results therefore do not depend on which worker executes a run.

use gnn_core::Direction;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator type owned by one direction fit.
pub type DirectionRng = ChaCha8Rng;

/// Stream number for `direction` of `run`.
///
/// With `common_random_numbers` both directions of a run read the same
/// stream: equal draws, still separate model and noise instances.
pub fn stream_for(run: usize, direction: Direction, common_random_numbers: bool) -> u64 {
    let base = 2 * run as u64;
    if common_random_numbers {
        base
    } else {
        base + direction.index()
    }
}

/// A generator positioned at the start of `stream` under `seed`.
pub fn direction_rng(seed: u64, stream: u64) -> DirectionRng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

/// A fresh base seed for a prediction without a configured seed.
pub fn fresh_seed() -> u64 {
    rand::random()
}
