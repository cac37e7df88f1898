//! Simulation orchestrator.
//!
//! Runs are independent: run `i` owns its own random source seeded with `base_seed + i`
//! and its own provider population, so they execute on the rayon pool without any
//! shared mutable state and are joined before aggregation.

use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use crate::aggregate::aggregate_runs;
use crate::config::{ConfigInput, SimulationConfig, SimulationParams};
use crate::types::{ResultMetadata, SimulationResults, SimulationRun};
use crate::utils::logging;
use crate::validation::{resolve, validate_params, ValidationReport};

pub mod runner;
pub use runner::{run_single, step};

#[cfg(test)]
mod tests;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Simulation cancelled")]
    Cancelled,
    #[error("Non-finite {field} at timestep {timestep}")]
    NonFiniteState { timestep: u64, field: &'static str },
    #[error("Run {run} (seed {seed}) failed: {source}")]
    RunFailed {
        run: usize,
        seed: u64,
        #[source]
        source: Box<SimulationError>,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(ValidationReport),
}

/// Cooperative cancellation flag shared with the runs of a batch
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ------------------------------------------------------------------------------------------------
// Multi-run entry points
// ------------------------------------------------------------------------------------------------

/// Validates boundary input, resolves it and runs the simulation
pub fn simulate(input: &ConfigInput, params: &SimulationParams) -> Result<SimulationResults, SimulationError> {
    let config = resolve(input).map_err(SimulationError::InvalidConfig)?;
    run_simulation(&config, params)
}

/// Runs `params.runs` trials and aggregates them
pub fn run_simulation(
    config: &SimulationConfig,
    params: &SimulationParams,
) -> Result<SimulationResults, SimulationError> {
    run_simulation_with(config, params, &CancellationToken::new(), |_| {})
}

/// Like [`run_simulation`], with a cancellation token and a callback invoked with the run
/// index each time a run completes (from worker threads, in completion order).
pub fn run_simulation_with<F>(
    config: &SimulationConfig,
    params: &SimulationParams,
    cancel: &CancellationToken,
    on_run_complete: F,
) -> Result<SimulationResults, SimulationError>
where
    F: Fn(usize) + Sync,
{
    let report = validate_params(params);
    if !report.valid {
        return Err(SimulationError::InvalidConfig(report));
    }

    let seed = params.seed.unwrap_or_else(rand::random::<u64>);
    logging::log(
        "ENGINE",
        &format!(
            "Starting {} runs x {} timesteps (base seed {})",
            params.runs, params.timesteps, seed
        ),
    );

    let start = Instant::now();
    let runs = run_batch(config, params.timesteps, params.runs, seed, cancel, &on_run_complete)?;
    let aggregated = aggregate_runs(&runs);
    let compute_time_ms = start.elapsed().as_millis();

    logging::log(
        "ENGINE",
        &format!("Completed {} runs in {} ms", runs.len(), compute_time_ms),
    );

    Ok(SimulationResults {
        aggregated,
        raw: params.retain_raw.then_some(runs),
        metadata: ResultMetadata {
            config: config.clone(),
            params: params.clone(),
            seed,
            timesteps: params.timesteps,
            runs: params.runs,
            compute_time_ms,
            generated_at: chrono::Utc::now(),
        },
    })
}

/// Executes runs `0..runs` in parallel; results come back in run order.
pub fn run_batch<F>(
    config: &SimulationConfig,
    timesteps: u64,
    runs: usize,
    base_seed: u64,
    cancel: &CancellationToken,
    on_run_complete: &F,
) -> Result<Vec<SimulationRun>, SimulationError>
where
    F: Fn(usize) + Sync,
{
    (0..runs)
        .into_par_iter()
        .map(|run| {
            if cancel.is_cancelled() {
                return Err(SimulationError::Cancelled);
            }
            let seed = run_seed(base_seed, run);
            let history = run_single(config, timesteps, run, seed, cancel).map_err(|e| match e {
                SimulationError::Cancelled => SimulationError::Cancelled,
                other => {
                    tracing::error!(run, seed, error = %other, "run failed");
                    SimulationError::RunFailed {
                        run,
                        seed,
                        source: Box::new(other),
                    }
                }
            })?;
            on_run_complete(run);
            Ok(history)
        })
        .collect()
}

/// Seed of run `run` in a batch started from `base_seed`
pub fn run_seed(base_seed: u64, run: usize) -> u64 {
    base_seed.wrapping_add(run as u64)
}
