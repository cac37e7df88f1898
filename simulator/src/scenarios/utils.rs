use chrono::Local;
use depin_sim::utils::logging;

use crate::config::ScenarioConfig;

/// Logs the settings a scenario is about to run with
pub fn log_configuration(title: &str, config: &ScenarioConfig) {
    let start_time = Local::now();
    logging::log("SIMULATOR", &format!("=== {} Configuration ===", title));
    logging::log("SIMULATOR", &format!("Start Time: {}", start_time.format("%Y-%m-%d %H:%M:%S")));
    logging::log("SIMULATOR", &format!("Runs: {}", config.simulation.runs));
    logging::log("SIMULATOR", &format!("Timesteps: {}", config.simulation.timesteps));
    match config.simulation.seed {
        Some(seed) => logging::log("SIMULATOR", &format!("Seed: {}", seed)),
        None => logging::log("SIMULATOR", "Seed: random"),
    }
    logging::log("SIMULATOR", &format!("Initial Supply: {}", config.token.initial_supply));
    logging::log("SIMULATOR", &format!("Initial Token Price: {}", config.token.initial_price));
    logging::log("SIMULATOR", &format!("Demand Scenario: {}", config.demand.scenario));
    logging::log("SIMULATOR", &format!("Base Demand: {}", config.demand.base_demand));
    logging::log("SIMULATOR", &format!("Macro Condition: {}", config.macro_conditions.condition));
    logging::log("SIMULATOR", &format!("Max Mint Per Period: {}", config.protocol.max_mint_per_period));
    logging::log("SIMULATOR", &format!("Burn Fraction: {}", config.protocol.burn_fraction));
    logging::log("SIMULATOR", &format!("Provider Inflow Rate: {}", config.providers.inflow_rate));
    logging::log("SIMULATOR", &format!("Initial Providers: {}", config.providers.initial_providers));
    logging::log("SIMULATOR", "=============================");
}
