//! Provider population of a single run: onboarding, exits and reward distribution.

pub mod pool;
pub use pool::ProviderPool;

#[cfg(test)]
mod tests;

use crate::types::Provider;

/// Outcome of one onboarding round
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OnboardingSummary {
    /// Candidates that showed up this period
    pub candidates: u64,
    /// Candidates that joined
    pub onboarded: u64,
}

/// Outcome of one exit round
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExitSummary {
    pub exited: Vec<Provider>,
    /// Tokens dumped on the market by exiting providers
    pub liquidated_tokens: f64,
}

/// Outcome of one reward distribution
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistributionSummary {
    pub tokens_distributed: f64,
    pub tokens_sold: f64,
}

/// One-period lookback decision: would the candidate have been profitable at the
/// given reward rate and token price?
pub fn should_onboard(capacity: f64, cost: f64, reward_rate: f64, token_price: f64) -> bool {
    capacity * reward_rate * token_price > cost
}
