//! Loosely typed configuration as it arrives from files or forms.
//!
//! Scenario and regime names stay plain strings here; they are checked and turned into
//! enums by the validator.

use serde::{Deserialize, Serialize};

use super::{ProtocolParams, ProviderParams, TokenParams};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigInput {
    pub token: TokenParams,
    pub demand: DemandInput,
    pub macro_conditions: MacroInput,
    pub protocol: ProtocolParams,
    pub providers: ProviderParams,
}

/// Demand settings; knobs for every scenario are present, only the selected one is used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemandInput {
    /// One of `consistent`, `growth`, `decay`, `volatile`
    pub scenario: String,
    pub base_demand: f64,
    pub elasticity: f64,
    pub noise_level: f64,
    pub growth_rate: f64,
    pub decay_rate: f64,
    pub volatility: f64,
}

impl Default for DemandInput {
    fn default() -> Self {
        Self {
            scenario: "consistent".to_string(),
            base_demand: 1000.0,
            elasticity: 1.0,
            noise_level: 0.1,
            growth_rate: 0.02,
            decay_rate: 0.01,
            volatility: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroInput {
    /// One of `bullish`, `bearish`, `sideways`
    pub condition: String,
    pub sensitivity: f64,
}

impl Default for MacroInput {
    fn default() -> Self {
        Self {
            condition: "sideways".to_string(),
            sensitivity: 1.0,
        }
    }
}
