// Runs the provider inflow rate sweep
//
// The expected number of onboarding candidates per period is stepped from `start` in
// `inflow_rate_step` increments, showing how quickly capacity catches up with demand.
use crate::config::{ConfigError, ScenarioConfig, SweepKind};
use crate::scenarios::sweep_runner::{SweepPoint, SweepRunner};

pub const CONFIG_FILE: &str = "config_sweep_inflow_rate.toml";
pub const RESULTS_NAME: &str = "sim_sweep_inflow_rate";

pub fn inflow_rate_runner(base: &ScenarioConfig) -> Result<SweepRunner<f64>, ConfigError> {
    let sweep = base
        .sweep
        .as_ref()
        .ok_or_else(|| ConfigError::ValidationError("Missing [sweep] section".into()))?;
    let step = sweep
        .inflow_rate_step
        .ok_or_else(|| ConfigError::ValidationError("inflow_rate_step is required".into()))?;

    Ok(SweepRunner::new(
        "Inflow Rate",
        RESULTS_NAME,
        "inflow_rate",
        sweep.stepped_values(step),
        Box::new(|base: &ScenarioConfig, inflow_rate: &f64| {
            let mut config = base.clone();
            config.providers.inflow_rate = *inflow_rate;
            config
        }),
    ))
}

pub async fn run_sweep_inflow_rate_simulation() -> Result<Vec<SweepPoint<f64>>, ConfigError> {
    let base = ScenarioConfig::load_sweep(CONFIG_FILE, SweepKind::InflowRate)?;
    inflow_rate_runner(&base)?.run(&base).await
}
