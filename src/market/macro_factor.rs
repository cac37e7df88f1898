use crate::config::{MacroCondition, MacroParams};
use crate::rng::SimRng;
use crate::types::constants::{BEARISH_DRIFT, BULLISH_DRIFT, SIDEWAYS_DRIFT};

/// Drift band `(low, high)` of a regime before sensitivity scaling
pub fn drift_band(condition: MacroCondition) -> (f64, f64) {
    match condition {
        MacroCondition::Bullish => BULLISH_DRIFT,
        MacroCondition::Bearish => BEARISH_DRIFT,
        MacroCondition::Sideways => SIDEWAYS_DRIFT,
    }
}

/// Draws this period's macro factor. Stateless: one uniform draw per call.
pub fn macro_factor(params: &MacroParams, rng: &mut SimRng) -> f64 {
    let (low, high) = drift_band(params.condition);
    rng.uniform(low, high) * params.sensitivity
}
