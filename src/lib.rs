//! Monte Carlo engine for token-economy dynamics of decentralized infrastructure protocols.
//!
//! Providers join and leave on profitability, users generate demand for service, and the
//! protocol mints and burns tokens while a service price and a token price clear each
//! period. Many seeded trials are run independently and reduced to per-timestep statistics.

pub mod aggregate;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod market;
pub mod protocol;
pub mod providers;
pub mod rng;
pub mod types;
pub mod utils;
pub mod validation;

pub use config::{ConfigInput, SimulationConfig, SimulationParams};
pub use diagnostics::diagnose;
pub use engine::{run_simulation, run_simulation_with, simulate, CancellationToken, SimulationError};
pub use rng::SimRng;
pub use types::{AggregatedStep, Metric, MetricStats, SimulationResults, SimulationRun, SimulationState};
pub use validation::{resolve, validate, ValidationReport};
