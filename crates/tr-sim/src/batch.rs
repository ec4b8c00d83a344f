//! Replaying several independent runs at once.

use tr_core::ReplayConfig;

use crate::{ReplayOutcome, SimulationData, run_simulation};

/// Replay each run independently.  Outcomes come back in input order.
///
/// With the `parallel` feature the runs are spread over Rayon's thread pool.
/// Each run owns its tables, so the outcomes match a sequential replay.
pub fn replay_batch(runs: Vec<SimulationData>, config: &ReplayConfig) -> Vec<ReplayOutcome> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        runs.into_par_iter().map(|data| run_simulation(data, config)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        runs.into_iter().map(|data| run_simulation(data, config)).collect()
    }
}
