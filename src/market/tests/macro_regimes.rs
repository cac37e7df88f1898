use crate::config::{MacroCondition, MacroParams};
use crate::market::macro_factor::{drift_band, macro_factor};
use crate::rng::SimRng;

#[test]
fn test_each_regime_stays_in_its_band() {
    let mut rng = SimRng::new(11);
    for condition in [MacroCondition::Bullish, MacroCondition::Bearish, MacroCondition::Sideways] {
        let params = MacroParams { condition, sensitivity: 1.0 };
        let (low, high) = drift_band(condition);
        for _ in 0..500 {
            let factor = macro_factor(&params, &mut rng);
            assert!(factor >= low && factor <= high, "{:?}: {}", condition, factor);
        }
    }
}

#[test]
fn test_sensitivity_scales_drift() {
    let bullish = MacroParams { condition: MacroCondition::Bullish, sensitivity: 2.0 };
    let mut a = SimRng::new(5);
    let mut b = SimRng::new(5);
    let scaled = macro_factor(&bullish, &mut a);
    let unscaled = macro_factor(&MacroParams { sensitivity: 1.0, ..bullish.clone() }, &mut b);
    assert!((scaled - 2.0 * unscaled).abs() < 1e-12);

    let muted = MacroParams { condition: MacroCondition::Bearish, sensitivity: 0.0 };
    assert_eq!(macro_factor(&muted, &mut a), 0.0);
}
