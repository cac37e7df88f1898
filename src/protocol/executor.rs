use crate::config::ProtocolParams;
use crate::types::bounded;

/// Token flows generated by serving one period's demand
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ServiceOutcome {
    /// Tokens users buy to pay for the service
    pub tokens_bought: f64,
    /// Reward tokens minted for providers
    pub minted: f64,
    /// Tokens removed from circulation
    pub burned: f64,
    /// Minted tokens per unit of active capacity
    pub reward_rate: f64,
}

/// Converts demand into bought, minted and burned tokens.
///
/// The returned reward rate is the one paid out to providers in the same step.
pub fn execute_service(
    params: &ProtocolParams,
    token_price: f64,
    service_price: f64,
    total_capacity: f64,
    demand: f64,
) -> ServiceOutcome {
    // Saturating demand against a floored token price overflows the division
    let tokens_bought = bounded(demand * service_price / token_price, 0.0);
    let minted = tokens_bought.min(params.max_mint_per_period);
    let burned = tokens_bought * params.burn_fraction;
    let reward_rate = if total_capacity > 0.0 {
        minted / total_capacity
    } else {
        0.0
    };

    ServiceOutcome {
        tokens_bought,
        minted,
        burned,
        reward_rate,
    }
}
