//! Scenario runner for the token-economy simulation engine.
//! Loads TOML scenario files, runs single simulations and parameter sweeps with progress
//! reporting, and writes results as JSON and CSV.

pub mod config;
pub mod interface;
pub mod run_simulation;
pub mod scenarios;
pub mod simulation_registry;
pub mod simulation_results;
pub mod stats;

pub use config::{ConfigError, ScenarioConfig};
pub use stats::SimulatorStats;
