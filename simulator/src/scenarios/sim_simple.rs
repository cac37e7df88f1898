use depin_sim::diagnose;

use crate::config::{results_path, ConfigError, ScenarioConfig};
use crate::run_simulation::run_simulation;
use crate::scenarios::utils::log_configuration;
use crate::simulation_results::save_results;
use crate::stats::SimulatorStats;

pub const CONFIG_FILE: &str = "config_simple.toml";
pub const RESULTS_NAME: &str = "sim_simple";

/// Runs the simple simulation
pub async fn run_simple_simulation() -> Result<(), ConfigError> {
    let config = ScenarioConfig::load(CONFIG_FILE)?;
    log_configuration("Simple Simulation", &config);

    let results = run_simulation("Simple", config.resolve()?, config.simulation.clone()).await?;
    save_results(&results, &results_path(RESULTS_NAME).join("data")).await?;

    let warnings = diagnose(&results.aggregated);
    SimulatorStats::from_results(&results, warnings).print_final_stats();
    Ok(())
}
