use crate::config::ProviderParams;
use crate::rng::SimRng;
use crate::types::constants::MIN_PROVIDER_CAPACITY;
use crate::types::{bounded, Provider, ProviderId};

use super::{should_onboard, DistributionSummary, ExitSummary, OnboardingSummary};

/// Active providers of one run. Exclusively owned by that run.
#[derive(Debug, Clone, Default)]
pub struct ProviderPool {
    providers: Vec<Provider>,
    next_id: u64,
}

impl ProviderPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pool with `count` providers joined at t=0
    pub fn with_initial(params: &ProviderParams, count: usize, rng: &mut SimRng) -> Self {
        let mut pool = Self::new();
        for _ in 0..count {
            let (capacity, cost) = sample_candidate(params, rng);
            pool.admit(capacity, cost, 0);
        }
        pool
    }

    /// Wraps an existing population; new ids continue after the highest one present
    pub fn from_providers(providers: Vec<Provider>) -> Self {
        let next_id = providers.iter().map(|p| p.id.0 + 1).max().unwrap_or(0);
        Self { providers, next_id }
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn total_capacity(&self) -> f64 {
        bounded(self.providers.iter().map(|p| p.capacity).sum(), 0.0)
    }

    /// Value copy of the current population for a state snapshot
    pub fn snapshot(&self) -> Vec<Provider> {
        self.providers.clone()
    }

    fn admit(&mut self, capacity: f64, cost: f64, timestep: u64) -> ProviderId {
        let id = ProviderId(self.next_id);
        self.next_id += 1;
        self.providers.push(Provider::new(id, capacity, cost, timestep));
        id
    }

    /// Draws this period's candidates and admits those that would have been profitable
    /// at the previous period's reward rate and token price.
    pub fn onboard(
        &mut self,
        params: &ProviderParams,
        reward_rate: f64,
        token_price: f64,
        timestep: u64,
        rng: &mut SimRng,
    ) -> OnboardingSummary {
        let candidates = rng.poisson(params.inflow_rate);
        let mut onboarded = 0;
        for _ in 0..candidates {
            let (capacity, cost) = sample_candidate(params, rng);
            if should_onboard(capacity, cost, reward_rate, token_price) {
                self.admit(capacity, cost, timestep);
                onboarded += 1;
            }
        }
        OnboardingSummary { candidates, onboarded }
    }

    /// Removes every provider whose latest recorded profit is not positive.
    ///
    /// Runs before the current period's distribution, so it judges the profit of an
    /// earlier period. Exiting providers liquidate their whole balance.
    pub fn remove_unprofitable(&mut self) -> ExitSummary {
        let (leaving, staying): (Vec<Provider>, Vec<Provider>) = std::mem::take(&mut self.providers)
            .into_iter()
            .partition(|p| matches!(p.last_profit(), Some(profit) if profit <= 0.0));
        self.providers = staying;

        let mut summary = ExitSummary::default();
        for mut provider in leaving {
            summary.liquidated_tokens = bounded(summary.liquidated_tokens + provider.balance, 0.0);
            provider.balance = 0.0;
            provider.active = false;
            summary.exited.push(provider);
        }
        summary
    }

    /// Pays every provider `capacity * reward_rate` tokens and sells enough of its
    /// balance to cover the period's cost.
    pub fn distribute(&mut self, reward_rate: f64, token_price: f64) -> DistributionSummary {
        let mut summary = DistributionSummary::default();
        for provider in self.providers.iter_mut() {
            let earned = provider.capacity * reward_rate;
            provider.balance = bounded(provider.balance + earned, 0.0);

            let sold = provider.balance.min(provider.cost / token_price);
            provider.balance -= sold;

            provider.record_profit(earned * token_price - provider.cost);

            summary.tokens_distributed += earned;
            summary.tokens_sold = bounded(summary.tokens_sold + sold, 0.0);
        }
        summary
    }
}

/// Samples `(capacity, cost)` for one candidate
pub fn sample_candidate(params: &ProviderParams, rng: &mut SimRng) -> (f64, f64) {
    let capacity = rng
        .lognormal(params.capacity_mean, params.capacity_std);
    let capacity = bounded(capacity, MIN_PROVIDER_CAPACITY);
    let cost = rng.uniform(params.cost_min, params.cost_max).max(0.0);
    (capacity, cost)
}
