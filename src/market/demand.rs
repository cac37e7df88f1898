use crate::config::{DemandParams, DemandScenario};
use crate::rng::SimRng;
use crate::types::bounded;
use crate::types::constants::DEMAND_REFERENCE_SERVICE_PRICE;

/// Multiplier applied to demand for a given service price.
///
/// Neutral (1.0) at the reference price; higher prices suppress demand.
pub fn price_adjustment(elasticity: f64, service_price: f64) -> f64 {
    (-0.5 * elasticity * (service_price / DEMAND_REFERENCE_SERVICE_PRICE).ln()).exp()
}

/// Service demand for timestep `timestep`.
///
/// `previous_demand` is the demand of the prior period and is only read by the growth
/// scenario; pass `None` on the first step. The result is finite and never negative,
/// saturating at `f64::MAX` when growth or elasticity overflow.
pub fn generate_demand(
    params: &DemandParams,
    timestep: u64,
    previous_demand: Option<f64>,
    service_price: f64,
    macro_factor: f64,
    demand_macro_sensitivity: f64,
    rng: &mut SimRng,
) -> f64 {
    let adjustment = price_adjustment(params.elasticity, service_price);

    let base = match params.scenario {
        DemandScenario::Consistent => params.base_demand,
        DemandScenario::Growth { rate } => match previous_demand {
            Some(previous) if timestep > 1 => previous * (1.0 + rate),
            _ => params.base_demand,
        },
        DemandScenario::Decay { rate } => params.base_demand * (-rate * timestep as f64).exp(),
        DemandScenario::Volatile { volatility } => {
            params.base_demand * (1.0 + rng.uniform(-1.0, 1.0) * volatility)
        }
    };

    let noise = 1.0 + rng.normal(0.0, params.noise_level);
    let demand = base * adjustment * noise * (1.0 + macro_factor * demand_macro_sensitivity);
    bounded(demand, 0.0)
}
