use crate::config::ProtocolParams;
use crate::types::constants::TOKEN_PRICE_FLOOR;

/// Reprices the service from the ratio of demand to available capacity.
///
/// With no capacity at all the price jumps straight to the ceiling.
pub fn update_service_price(
    params: &ProtocolParams,
    service_price: f64,
    demand: f64,
    total_capacity: f64,
) -> f64 {
    if total_capacity <= 0.0 {
        return params.service_price_ceiling;
    }
    let utilization = demand / total_capacity;
    let repriced = service_price * utilization.powf(params.service_price_elasticity);
    repriced.clamp(params.service_price_floor, params.service_price_ceiling)
}

/// Moves the token price with net buy/sell pressure relative to supply and the macro drift.
pub fn update_token_price(
    params: &ProtocolParams,
    token_price: f64,
    tokens_bought: f64,
    tokens_sold: f64,
    circulating_supply: f64,
    macro_factor: f64,
) -> f64 {
    let net_flow = tokens_bought - tokens_sold;
    let flow_ratio = if circulating_supply > 0.0 {
        net_flow / circulating_supply
    } else {
        0.0
    };
    let price_change = (params.token_price_response * flow_ratio).exp();
    let repriced = token_price * price_change * (1.0 + macro_factor);
    if repriced.is_nan() {
        return TOKEN_PRICE_FLOOR;
    }
    // A flood of buys against a nearly burned-out supply can overflow the exponent
    repriced.clamp(TOKEN_PRICE_FLOOR, f64::MAX)
}
