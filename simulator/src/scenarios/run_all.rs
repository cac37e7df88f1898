use depin_sim::utils::logging;
use std::time::Instant;

use crate::config::ConfigError;

/// Runs every scenario sequentially
pub async fn run_all_simulations() -> Result<(), ConfigError> {
    let start_time = Instant::now();

    logging::log("SIMULATOR", "=== Starting All Simulations ===");

    crate::scenarios::sim_simple::run_simple_simulation().await?;
    crate::scenarios::sim_sweep_burn_fraction::run_sweep_burn_fraction_simulation().await?;
    crate::scenarios::sim_sweep_inflow_rate::run_sweep_inflow_rate_simulation().await?;
    crate::scenarios::sim_compare_demand::run_compare_demand_simulation().await?;

    let total_time = start_time.elapsed();
    logging::log("SIMULATOR", "=== All Simulations Completed Successfully ===");
    logging::log("SIMULATOR", &format!("Total execution time: {:.2?}", total_time));

    println!("All simulations completed successfully!");
    println!("Total execution time: {:.2?}", total_time);

    Ok(())
}
