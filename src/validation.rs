//! Pre-flight configuration checks.
//!
//! Validation never fails: it returns a [`ValidationReport`] listing every problem found,
//! each tagged with the dotted path of the offending field. [`resolve`] is the only place
//! scenario and regime names are turned into enums.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{
    ConfigInput, DemandParams, DemandScenario, MacroCondition, MacroParams, SimulationConfig,
    SimulationParams,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Whether any error is tagged with `field`
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return f.write_str("valid");
        }
        let joined: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&joined.join("; "))
    }
}

/// Accumulates field errors
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    fn positive(&mut self, field: &str, value: f64) {
        if !(value > 0.0 && value.is_finite()) {
            self.fail(field, format!("must be positive, got {}", value));
        }
    }

    fn non_negative(&mut self, field: &str, value: f64) {
        if !(value >= 0.0 && value.is_finite()) {
            self.fail(field, format!("must be non-negative, got {}", value));
        }
    }

    fn unit_interval(&mut self, field: &str, value: f64) {
        if !(0.0..=1.0).contains(&value) {
            self.fail(field, format!("must be between 0 and 1, got {}", value));
        }
    }

    fn finite(&mut self, field: &str, value: f64) {
        if !value.is_finite() {
            self.fail(field, format!("must be a finite number, got {}", value));
        }
    }
}

/// Parses a demand scenario name together with its knob from the input
pub fn parse_demand_scenario(input: &crate::config::DemandInput) -> Option<DemandScenario> {
    match input.scenario.trim().to_ascii_lowercase().as_str() {
        "consistent" => Some(DemandScenario::Consistent),
        "growth" => Some(DemandScenario::Growth { rate: input.growth_rate }),
        "decay" => Some(DemandScenario::Decay { rate: input.decay_rate }),
        "volatile" => Some(DemandScenario::Volatile { volatility: input.volatility }),
        _ => None,
    }
}

pub fn parse_macro_condition(name: &str) -> Option<MacroCondition> {
    match name.trim().to_ascii_lowercase().as_str() {
        "bullish" => Some(MacroCondition::Bullish),
        "bearish" => Some(MacroCondition::Bearish),
        "sideways" => Some(MacroCondition::Sideways),
        _ => None,
    }
}

/// Checks boundary input without resolving it
pub fn validate(input: &ConfigInput) -> ValidationReport {
    let mut check = Checker::default();

    // Token
    check.positive("token.initial_supply", input.token.initial_supply);
    check.positive("token.initial_price", input.token.initial_price);
    check.positive("token.initial_service_price", input.token.initial_service_price);

    // Demand
    let demand = &input.demand;
    match parse_demand_scenario(demand) {
        None => check.fail(
            "demand.scenario",
            format!(
                "unknown demand scenario '{}', expected consistent, growth, decay or volatile",
                demand.scenario
            ),
        ),
        Some(DemandScenario::Growth { rate }) => check.finite("demand.growth_rate", rate),
        Some(DemandScenario::Decay { rate }) => check.non_negative("demand.decay_rate", rate),
        Some(DemandScenario::Volatile { volatility }) => {
            check.unit_interval("demand.volatility", volatility)
        }
        Some(DemandScenario::Consistent) => {}
    }
    check.non_negative("demand.base_demand", demand.base_demand);
    check.finite("demand.elasticity", demand.elasticity);
    check.unit_interval("demand.noise_level", demand.noise_level);

    // Macro
    if parse_macro_condition(&input.macro_conditions.condition).is_none() {
        check.fail(
            "macro_conditions.condition",
            format!(
                "unknown macro condition '{}', expected bullish, bearish or sideways",
                input.macro_conditions.condition
            ),
        );
    }
    check.non_negative("macro_conditions.sensitivity", input.macro_conditions.sensitivity);

    // Protocol
    let protocol = &input.protocol;
    check.non_negative("protocol.max_mint_per_period", protocol.max_mint_per_period);
    check.unit_interval("protocol.burn_fraction", protocol.burn_fraction);
    check.positive("protocol.service_price_floor", protocol.service_price_floor);
    check.positive("protocol.service_price_ceiling", protocol.service_price_ceiling);
    if protocol.service_price_floor >= protocol.service_price_ceiling {
        check.fail(
            "protocol.service_price_floor",
            format!(
                "floor ({}) must be below ceiling ({})",
                protocol.service_price_floor, protocol.service_price_ceiling
            ),
        );
    }
    check.finite("protocol.service_price_elasticity", protocol.service_price_elasticity);
    check.finite("protocol.token_price_response", protocol.token_price_response);
    check.finite("protocol.demand_macro_sensitivity", protocol.demand_macro_sensitivity);

    // Providers
    let providers = &input.providers;
    check.non_negative("providers.inflow_rate", providers.inflow_rate);
    check.positive("providers.capacity_mean", providers.capacity_mean);
    check.positive("providers.capacity_std", providers.capacity_std);
    check.non_negative("providers.cost_min", providers.cost_min);
    check.positive("providers.cost_max", providers.cost_max);
    if providers.cost_min >= providers.cost_max {
        check.fail(
            "providers.cost_min",
            format!(
                "minimum cost ({}) must be below maximum cost ({})",
                providers.cost_min, providers.cost_max
            ),
        );
    }

    ValidationReport::from_errors(check.errors)
}

/// Checks run parameters
pub fn validate_params(params: &SimulationParams) -> ValidationReport {
    let mut check = Checker::default();
    if params.runs == 0 {
        check.fail("simulation.runs", "must be at least 1");
    }
    if params.timesteps == 0 {
        check.fail("simulation.timesteps", "must be at least 1");
    }
    ValidationReport::from_errors(check.errors)
}

/// Validates the input and, if it is valid, resolves it into the typed configuration
pub fn resolve(input: &ConfigInput) -> Result<SimulationConfig, ValidationReport> {
    let report = validate(input);
    if !report.valid {
        return Err(report);
    }

    let unknown = |field: &str| ValidationReport::from_errors(vec![FieldError {
        field: field.to_string(),
        message: "unrecognised value".to_string(),
    }]);
    let scenario = parse_demand_scenario(&input.demand).ok_or_else(|| unknown("demand.scenario"))?;
    let condition = parse_macro_condition(&input.macro_conditions.condition)
        .ok_or_else(|| unknown("macro_conditions.condition"))?;

    Ok(SimulationConfig {
        token: input.token.clone(),
        demand: DemandParams {
            scenario,
            base_demand: input.demand.base_demand,
            elasticity: input.demand.elasticity,
            noise_level: input.demand.noise_level,
        },
        macro_conditions: MacroParams {
            condition,
            sensitivity: input.macro_conditions.sensitivity,
        },
        protocol: input.protocol.clone(),
        providers: input.providers.clone(),
    })
}
