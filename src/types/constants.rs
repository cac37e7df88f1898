//! Fixed values shared by the engine, the aggregator and the diagnostics.

/// Lowest value the token price may take
pub const TOKEN_PRICE_FLOOR: f64 = 0.0001;

/// Number of periods of profit a provider remembers
pub const PROFIT_HISTORY_LEN: usize = 4;

/// Floor applied to sampled provider capacity
pub const MIN_PROVIDER_CAPACITY: f64 = 1.0;

/// Service price at which the demand elasticity response is neutral
pub const DEMAND_REFERENCE_SERVICE_PRICE: f64 = 10.0;

/// Drift bands per macro regime, before sensitivity scaling
pub const BULLISH_DRIFT: (f64, f64) = (0.02, 0.05);
pub const BEARISH_DRIFT: (f64, f64) = (-0.05, -0.02);
pub const SIDEWAYS_DRIFT: (f64, f64) = (-0.01, 0.01);

// Diagnostic thresholds
pub const LOW_TOKEN_PRICE_WARNING: f64 = 0.01;
pub const LOW_DEMAND_WARNING: f64 = 1.0;
pub const HIGH_PRICE_CV_WARNING: f64 = 0.5;

/// Percentiles reported for every metric
pub const P10: f64 = 0.10;
pub const P50: f64 = 0.50;
pub const P90: f64 = 0.90;
