// Runs the same protocol under each listed demand scenario
//
// Every other setting, including the base seed, is shared so the final statistics
// differ only by the shape of demand.
use crate::config::{ConfigError, ScenarioConfig, SweepKind};
use crate::scenarios::sweep_runner::{SweepPoint, SweepRunner};

pub const CONFIG_FILE: &str = "config_compare_demand.toml";
pub const RESULTS_NAME: &str = "sim_compare_demand";

pub fn compare_demand_runner(base: &ScenarioConfig) -> Result<SweepRunner<String>, ConfigError> {
    let scenarios = base
        .sweep
        .as_ref()
        .map(|sweep| sweep.demand_scenarios.clone())
        .unwrap_or_default();
    if scenarios.is_empty() {
        return Err(ConfigError::ValidationError("No demand scenarios listed to compare".into()));
    }

    Ok(SweepRunner::new(
        "Demand Scenarios",
        RESULTS_NAME,
        "demand_scenario",
        scenarios,
        Box::new(|base: &ScenarioConfig, scenario: &String| {
            let mut config = base.clone();
            config.demand.scenario = scenario.clone();
            config
        }),
    ))
}

pub async fn run_compare_demand_simulation() -> Result<Vec<SweepPoint<String>>, ConfigError> {
    let base = ScenarioConfig::load_sweep(CONFIG_FILE, SweepKind::DemandScenario)?;
    compare_demand_runner(&base)?.run(&base).await
}
