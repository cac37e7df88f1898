// Runs the burn fraction sweep
//
// The share of each period's service payments that is burned is stepped from `start`
// in `burn_fraction_step` increments. Higher burn shrinks supply faster, which the token
// price update reads as scarcity.
use crate::config::{ConfigError, ScenarioConfig, SweepKind};
use crate::scenarios::sweep_runner::{SweepPoint, SweepRunner};

pub const CONFIG_FILE: &str = "config_sweep_burn_fraction.toml";
pub const RESULTS_NAME: &str = "sim_sweep_burn_fraction";

pub fn burn_fraction_runner(base: &ScenarioConfig) -> Result<SweepRunner<f64>, ConfigError> {
    let sweep = base
        .sweep
        .as_ref()
        .ok_or_else(|| ConfigError::ValidationError("Missing [sweep] section".into()))?;
    let step = sweep
        .burn_fraction_step
        .ok_or_else(|| ConfigError::ValidationError("burn_fraction_step is required".into()))?;
    // Float stepping can overshoot 1.0 by an ulp on the last point
    let values = sweep.stepped_values(step).into_iter().map(|v| v.min(1.0)).collect();

    Ok(SweepRunner::new(
        "Burn Fraction",
        RESULTS_NAME,
        "burn_fraction",
        values,
        Box::new(|base: &ScenarioConfig, burn_fraction: &f64| {
            let mut config = base.clone();
            config.protocol.burn_fraction = *burn_fraction;
            config
        }),
    ))
}

pub async fn run_sweep_burn_fraction_simulation() -> Result<Vec<SweepPoint<f64>>, ConfigError> {
    let base = ScenarioConfig::load_sweep(CONFIG_FILE, SweepKind::BurnFraction)?;
    burn_fraction_runner(&base)?.run(&base).await
}
