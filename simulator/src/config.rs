//! Configuration loader and validator for the simulator.
//! Scenario files are TOML documents holding the model input plus run parameters, and
//! optionally a `[sweep]` section for parameter sweeps.

use depin_sim::config::{DemandInput, MacroInput, ProtocolParams, ProviderParams, TokenParams};
use depin_sim::{ConfigInput, SimulationConfig, SimulationParams};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory holding the scenario TOML files
pub const SCENARIO_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/src/scenarios");

/// Root directory results are written under, one sub-directory per scenario
pub const RESULTS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/results");

// ------------------------------------------------------------------------------------------------
// Main Configuration Structs
// ------------------------------------------------------------------------------------------------

/// A scenario file.
///
/// The model sections mirror [`ConfigInput`] so a file can be handed to the engine's
/// validator as-is. Missing sections and fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub token: TokenParams,
    pub demand: DemandInput,
    pub macro_conditions: MacroInput,
    pub protocol: ProtocolParams,
    pub providers: ProviderParams,
    /// Number of runs, horizon and seed
    pub simulation: SimulationParams,
    /// Present only in sweep files
    pub sweep: Option<SweepParameters>,
}

// ------------------------------------------------------------------------------------------------
// Sweep Configuration Structs
// ------------------------------------------------------------------------------------------------

/// Controls a parameter sweep.
///
/// Only the step matching the sweep being run is read; the swept values are
/// `start, start + step, ...` for `num_simulations` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepParameters {
    /// Number of points in the sweep
    pub num_simulations: usize,
    /// First swept value
    #[serde(default)]
    pub start: f64,
    /// Step for burn fraction sweeps
    #[serde(default)]
    pub burn_fraction_step: Option<f64>,
    /// Step for provider inflow rate sweeps
    #[serde(default)]
    pub inflow_rate_step: Option<f64>,
    /// Demand scenarios compared side by side
    #[serde(default)]
    pub demand_scenarios: Vec<String>,
}

impl SweepParameters {
    /// Values produced by stepping from `start`
    pub fn stepped_values(&self, step: f64) -> Vec<f64> {
        (0..self.num_simulations)
            .map(|i| self.start + step * i as f64)
            .collect()
    }
}

// ------------------------------------------------------------------------------------------------
// Error Types
// ------------------------------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
    #[error("Simulation failed: {0}")]
    SimulationError(#[from] depin_sim::SimulationError),
    #[error("Failed to write results to {path}: {source}")]
    ResultsError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize results: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("Simulation task failed: {0}")]
    TaskError(String),
}

// ------------------------------------------------------------------------------------------------
// Validation
// ------------------------------------------------------------------------------------------------

pub trait ValidateConfig {
    fn validate_common(&self) -> Result<(), ConfigError>;
    fn validate_sweep_specific(&self) -> Result<(), ConfigError>;

    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_common()?;
        self.validate_sweep_specific()?;
        Ok(())
    }
}

/// Which swept parameter a sweep file is expected to configure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepKind {
    BurnFraction,
    InflowRate,
    DemandScenario,
}

/// A scenario file checked against the sweep it is loaded for
pub struct SweepFile<'a> {
    pub config: &'a ScenarioConfig,
    pub kind: SweepKind,
}

impl ValidateConfig for ScenarioConfig {
    fn validate_common(&self) -> Result<(), ConfigError> {
        let report = depin_sim::validate(&self.input());
        if !report.valid {
            return Err(ConfigError::ValidationError(report.to_string()));
        }
        let report = depin_sim::validation::validate_params(&self.simulation);
        if !report.valid {
            return Err(ConfigError::ValidationError(report.to_string()));
        }
        Ok(())
    }

    fn validate_sweep_specific(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

impl ValidateConfig for SweepFile<'_> {
    fn validate_common(&self) -> Result<(), ConfigError> {
        self.config.validate_common()
    }

    fn validate_sweep_specific(&self) -> Result<(), ConfigError> {
        let sweep = self.config.sweep.as_ref().ok_or_else(|| {
            ConfigError::ValidationError("Sweep file is missing its [sweep] section".into())
        })?;
        if sweep.num_simulations == 0 {
            return Err(ConfigError::ValidationError("Number of simulations must be positive".into()));
        }
        match self.kind {
            SweepKind::BurnFraction => {
                let step = required_step(sweep.burn_fraction_step, "burn_fraction_step")?;
                let last = sweep.start + step * (sweep.num_simulations - 1) as f64;
                if sweep.start < 0.0 || last > 1.0 {
                    return Err(ConfigError::ValidationError(format!(
                        "Burn fractions must stay between 0 and 1 (sweep covers {} to {})",
                        sweep.start, last
                    )));
                }
            }
            SweepKind::InflowRate => {
                required_step(sweep.inflow_rate_step, "inflow_rate_step")?;
                if sweep.start < 0.0 {
                    return Err(ConfigError::ValidationError("Inflow rate sweep must start at or above 0".into()));
                }
            }
            SweepKind::DemandScenario => {
                if sweep.demand_scenarios.is_empty() {
                    return Err(ConfigError::ValidationError("No demand scenarios listed to compare".into()));
                }
                for name in &sweep.demand_scenarios {
                    let demand = DemandInput {
                        scenario: name.clone(),
                        ..self.config.demand.clone()
                    };
                    if depin_sim::validation::parse_demand_scenario(&demand).is_none() {
                        return Err(ConfigError::ValidationError(format!("Unknown demand scenario '{}'", name)));
                    }
                }
            }
        }
        Ok(())
    }
}

fn required_step(step: Option<f64>, name: &str) -> Result<f64, ConfigError> {
    match step {
        Some(step) if step > 0.0 && step.is_finite() => Ok(step),
        Some(step) => Err(ConfigError::ValidationError(format!("{} must be positive, got {}", name, step))),
        None => Err(ConfigError::ValidationError(format!("{} is required for this sweep", name))),
    }
}

// ------------------------------------------------------------------------------------------------
// Configuration Implementation Methods
// ------------------------------------------------------------------------------------------------

impl ScenarioConfig {
    /// Loads and validates `<SCENARIO_DIR>/<file_name>`
    pub fn load(file_name: &str) -> Result<Self, ConfigError> {
        let config = Self::read(&scenario_path(file_name))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a sweep file and checks it configures the given sweep
    pub fn load_sweep(file_name: &str, kind: SweepKind) -> Result<Self, ConfigError> {
        let config = Self::read(&scenario_path(file_name))?;
        SweepFile { config: &config, kind }.validate()?;
        Ok(config)
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml_str(&config_str)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(config_str)?)
    }

    /// The model sections as engine input
    pub fn input(&self) -> ConfigInput {
        ConfigInput {
            token: self.token.clone(),
            demand: self.demand.clone(),
            macro_conditions: self.macro_conditions.clone(),
            protocol: self.protocol.clone(),
            providers: self.providers.clone(),
        }
    }

    /// Resolves the model sections into the engine's typed configuration
    pub fn resolve(&self) -> Result<SimulationConfig, ConfigError> {
        depin_sim::resolve(&self.input()).map_err(|report| ConfigError::ValidationError(report.to_string()))
    }
}

pub fn scenario_path(file_name: &str) -> PathBuf {
    Path::new(SCENARIO_DIR).join(file_name)
}

pub fn results_path(scenario: &str) -> PathBuf {
    Path::new(RESULTS_DIR).join(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWEEP_TOML: &str = r#"
        [protocol]
        burn_fraction = 0.2

        [simulation]
        runs = 4
        timesteps = 12
        seed = 7

        [sweep]
        num_simulations = 5
        start = 0.0
        burn_fraction_step = 0.25
    "#;

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config = ScenarioConfig::from_toml_str(SWEEP_TOML).expect("should parse");
        assert_eq!(config.protocol.burn_fraction, 0.2);
        assert_eq!(config.protocol.max_mint_per_period, ProtocolParams::default().max_mint_per_period);
        assert_eq!(config.simulation.runs, 4);
        assert_eq!(config.simulation.seed, Some(7));
        assert!(!config.simulation.retain_raw);
        assert_eq!(config.demand, DemandInput::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_stepped_values() {
        let config = ScenarioConfig::from_toml_str(SWEEP_TOML).expect("should parse");
        let sweep = config.sweep.as_ref().expect("sweep section");
        assert_eq!(sweep.stepped_values(0.25), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_sweep_must_configure_its_step() {
        let config = ScenarioConfig::from_toml_str(SWEEP_TOML).expect("should parse");
        assert!(SweepFile { config: &config, kind: SweepKind::BurnFraction }.validate().is_ok());
        let err = SweepFile { config: &config, kind: SweepKind::InflowRate }.validate();
        assert!(matches!(err, Err(ConfigError::ValidationError(msg)) if msg.contains("inflow_rate_step")));
    }

    #[test]
    fn test_burn_fraction_sweep_cannot_leave_unit_interval() {
        let mut config = ScenarioConfig::from_toml_str(SWEEP_TOML).expect("should parse");
        if let Some(sweep) = config.sweep.as_mut() {
            sweep.num_simulations = 6;
        }
        assert!(SweepFile { config: &config, kind: SweepKind::BurnFraction }.validate().is_err());
    }

    #[test]
    fn test_invalid_model_input_is_reported_with_field() {
        let config = ScenarioConfig::from_toml_str("[protocol]\nburn_fraction = 1.5\n").expect("should parse");
        match config.validate() {
            Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("protocol.burn_fraction")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_compared_scenario_is_rejected() {
        let toml = "[sweep]\nnum_simulations = 2\ndemand_scenarios = [\"growth\", \"boom\"]\n";
        let config = ScenarioConfig::from_toml_str(toml).expect("should parse");
        let err = SweepFile { config: &config, kind: SweepKind::DemandScenario }.validate();
        assert!(matches!(err, Err(ConfigError::ValidationError(msg)) if msg.contains("boom")));
    }

    #[test]
    fn test_shipped_scenario_files_are_valid() {
        assert!(ScenarioConfig::load("config_simple.toml").is_ok());
        assert!(ScenarioConfig::load_sweep("config_sweep_burn_fraction.toml", SweepKind::BurnFraction).is_ok());
        assert!(ScenarioConfig::load_sweep("config_sweep_inflow_rate.toml", SweepKind::InflowRate).is_ok());
        assert!(ScenarioConfig::load_sweep("config_compare_demand.toml", SweepKind::DemandScenario).is_ok());
    }
}
