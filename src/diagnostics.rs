//! Advisory warnings derived from aggregated results. Never blocks result delivery.

use crate::types::constants::{HIGH_PRICE_CV_WARNING, LOW_DEMAND_WARNING, LOW_TOKEN_PRICE_WARNING};
use crate::types::AggregatedStep;

/// Human-readable warnings about degenerate or unstable outcomes
pub fn diagnose(aggregated: &[AggregatedStep]) -> Vec<String> {
    let mut warnings = Vec::new();
    if aggregated.is_empty() {
        return warnings;
    }

    // The initial state carries no providers by construction when none are seeded,
    // so only simulated periods count.
    if let Some(step) = aggregated
        .iter()
        .find(|s| s.timestep > 0 && s.providers.mean == 0.0)
    {
        warnings.push(format!(
            "No active providers on average at timestep {}: the network has no capacity to serve demand",
            step.timestep
        ));
    }

    let min_price = aggregated
        .iter()
        .map(|s| s.token_price.mean)
        .fold(f64::INFINITY, f64::min);
    if min_price < LOW_TOKEN_PRICE_WARNING {
        warnings.push(format!(
            "Mean token price fell to {:.6}, below {}",
            min_price, LOW_TOKEN_PRICE_WARNING
        ));
    }

    let min_demand = aggregated
        .iter()
        .filter(|s| s.timestep > 0)
        .map(|s| s.demand.mean)
        .fold(f64::INFINITY, f64::min);
    if min_demand < LOW_DEMAND_WARNING {
        warnings.push(format!(
            "Mean demand fell to {:.4}, below {}",
            min_demand, LOW_DEMAND_WARNING
        ));
    }

    if let Some(last) = aggregated.last() {
        let price = &last.token_price;
        if price.mean > 0.0 {
            let cv = price.std / price.mean;
            if cv > HIGH_PRICE_CV_WARNING {
                warnings.push(format!(
                    "Token price dispersion across runs is high at the final timestep (CV {:.3} > {})",
                    cv, HIGH_PRICE_CV_WARNING
                ));
            }
        }
    }

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }
    warnings
}
