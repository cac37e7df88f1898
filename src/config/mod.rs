//! Typed simulation configuration.
//!
//! The engine only ever sees these types. Scenario and regime selection are closed enums
//! produced once by [`crate::validation::resolve`] from the loosely typed [`ConfigInput`].

use serde::{Deserialize, Serialize};

pub mod input;
pub use input::{ConfigInput, DemandInput, MacroInput};

// ------------------------------------------------------------------------------------------------
// Main Configuration Structs
// ------------------------------------------------------------------------------------------------

/// Complete configuration of the modelled protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub token: TokenParams,
    pub demand: DemandParams,
    pub macro_conditions: MacroParams,
    pub protocol: ProtocolParams,
    pub providers: ProviderParams,
}

/// Initial token economy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenParams {
    /// Tokens in circulation at t=0
    pub initial_supply: f64,
    /// Token price in USD at t=0
    pub initial_price: f64,
    /// Service price in USD per capacity unit at t=0
    pub initial_service_price: f64,
}

impl Default for TokenParams {
    fn default() -> Self {
        Self {
            initial_supply: 1_000_000.0,
            initial_price: 1.0,
            initial_service_price: 10.0,
        }
    }
}

/// Shape of the demand curve over time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DemandScenario {
    /// Flat around the base demand
    Consistent,
    /// Compounds the previous period's demand by `rate`
    Growth { rate: f64 },
    /// Exponential decay from the base demand at `rate` per period
    Decay { rate: f64 },
    /// Base demand perturbed by up to `volatility` in either direction
    Volatile { volatility: f64 },
}

impl DemandScenario {
    pub fn name(&self) -> &'static str {
        match self {
            DemandScenario::Consistent => "consistent",
            DemandScenario::Growth { .. } => "growth",
            DemandScenario::Decay { .. } => "decay",
            DemandScenario::Volatile { .. } => "volatile",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandParams {
    pub scenario: DemandScenario,
    pub base_demand: f64,
    /// Demand response to the service price
    pub elasticity: f64,
    /// Standard deviation of the multiplicative noise term
    pub noise_level: f64,
}

/// Market regime driving the macro factor
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroCondition {
    Bullish,
    Bearish,
    Sideways,
}

impl MacroCondition {
    pub fn name(&self) -> &'static str {
        match self {
            MacroCondition::Bullish => "bullish",
            MacroCondition::Bearish => "bearish",
            MacroCondition::Sideways => "sideways",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroParams {
    pub condition: MacroCondition,
    /// Multiplier applied to the drawn drift
    pub sensitivity: f64,
}

/// Mint, burn and price-discovery rules of the protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolParams {
    /// Upper bound on tokens minted as rewards per period
    pub max_mint_per_period: f64,
    /// Share of tokens bought that is burned, in [0, 1]
    pub burn_fraction: f64,
    pub service_price_floor: f64,
    pub service_price_ceiling: f64,
    /// Exponent applied to the utilization ratio when repricing the service
    pub service_price_elasticity: f64,
    /// Coefficient of the token price response to net flow
    pub token_price_response: f64,
    /// How strongly the macro factor moves demand
    pub demand_macro_sensitivity: f64,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            max_mint_per_period: 500.0,
            burn_fraction: 0.1,
            service_price_floor: 1.0,
            service_price_ceiling: 100.0,
            service_price_elasticity: 0.5,
            token_price_response: 1.0,
            demand_macro_sensitivity: 1.0,
        }
    }
}

/// Arrival and economics of capacity providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderParams {
    /// Mean of the Poisson-distributed candidate count per period
    pub inflow_rate: f64,
    /// Arithmetic mean of the lognormal capacity distribution
    pub capacity_mean: f64,
    /// Arithmetic standard deviation of the lognormal capacity distribution
    pub capacity_std: f64,
    /// Lower bound of the uniform per-period cost distribution
    pub cost_min: f64,
    /// Upper bound of the uniform per-period cost distribution
    pub cost_max: f64,
    /// Whether providers leave after an unprofitable period
    pub exit_on_negative_profit: bool,
    /// Providers present at t=0
    pub initial_providers: usize,
}

impl Default for ProviderParams {
    fn default() -> Self {
        Self {
            inflow_rate: 5.0,
            capacity_mean: 100.0,
            capacity_std: 30.0,
            cost_min: 10.0,
            cost_max: 50.0,
            exit_on_negative_profit: true,
            initial_providers: 0,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Run parameters
// ------------------------------------------------------------------------------------------------

/// How many trials to run and for how long
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Periods simulated after the initial state
    pub timesteps: u64,
    /// Independent trials
    pub runs: usize,
    /// Base seed; drawn at random and recorded when absent
    pub seed: Option<u64>,
    /// Keep every run's full history in the results
    pub retain_raw: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            timesteps: 52,
            runs: 100,
            seed: None,
            retain_raw: false,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let input = ConfigInput::default();
        Self {
            token: input.token,
            demand: DemandParams {
                scenario: DemandScenario::Consistent,
                base_demand: input.demand.base_demand,
                elasticity: input.demand.elasticity,
                noise_level: input.demand.noise_level,
            },
            macro_conditions: MacroParams {
                condition: MacroCondition::Sideways,
                sensitivity: input.macro_conditions.sensitivity,
            },
            protocol: input.protocol,
            providers: input.providers,
        }
    }
}
