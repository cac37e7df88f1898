use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crate::config::{SimulationConfig, SimulationParams};

pub mod constants;

/// Keeps a token or demand quantity finite: NaN becomes 0 and the result lies in `[lower, f64::MAX]`.
pub fn bounded(value: f64, lower: f64) -> f64 {
    let value = if value.is_nan() { 0.0 } else { value };
    value.clamp(lower, f64::MAX)
}

// ------------------------------------------------------------------------------------------------
// Providers
// ------------------------------------------------------------------------------------------------

/// A unique identifier for a provider within one run
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ProviderId(pub u64);

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "provider-{}", self.0)
    }
}

/// An agent supplying capacity to the network in exchange for token rewards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Identifier, unique within the run and never reused
    pub id: ProviderId,
    /// Capacity units offered to the network
    pub capacity: f64,
    /// Operating cost in USD per period
    pub cost: f64,
    /// Tokens held and not yet sold
    pub balance: f64,
    /// Profit of the most recent periods, oldest first
    pub profit_history: VecDeque<f64>,
    /// Whether the provider is still serving
    pub active: bool,
    /// Timestep at which the provider joined
    pub joined_at: u64,
}

impl Provider {
    pub fn new(id: ProviderId, capacity: f64, cost: f64, joined_at: u64) -> Self {
        Self {
            id,
            capacity,
            cost,
            balance: 0.0,
            profit_history: VecDeque::with_capacity(constants::PROFIT_HISTORY_LEN),
            active: true,
            joined_at,
        }
    }

    /// Appends a profit entry, dropping the oldest once the history is full
    pub fn record_profit(&mut self, profit: f64) {
        if self.profit_history.len() == constants::PROFIT_HISTORY_LEN {
            self.profit_history.pop_front();
        }
        self.profit_history.push_back(profit);
    }

    /// The most recently recorded profit, if any
    pub fn last_profit(&self) -> Option<f64> {
        self.profit_history.back().copied()
    }
}

// ------------------------------------------------------------------------------------------------
// Simulation state
// ------------------------------------------------------------------------------------------------

/// Snapshot of one run at one timestep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub timestep: u64,
    pub token_price: f64,
    pub circulating_supply: f64,
    pub tokens_bought: f64,
    pub tokens_sold: f64,
    pub tokens_minted: f64,
    pub tokens_burned: f64,
    pub net_flow: f64,
    pub demand: f64,
    pub service_price: f64,
    pub active_providers: usize,
    pub total_capacity: f64,
    pub average_capacity: f64,
    pub reward_rate: f64,
    pub macro_factor: f64,
    pub providers: Vec<Provider>,
}

impl SimulationState {
    /// The state every run starts from
    pub fn initial(config: &SimulationConfig, providers: Vec<Provider>) -> Self {
        let mut state = Self {
            timestep: 0,
            token_price: config.token.initial_price.max(constants::TOKEN_PRICE_FLOOR),
            circulating_supply: config.token.initial_supply,
            tokens_bought: 0.0,
            tokens_sold: 0.0,
            tokens_minted: 0.0,
            tokens_burned: 0.0,
            net_flow: 0.0,
            demand: 0.0,
            service_price: config.token.initial_service_price,
            active_providers: 0,
            total_capacity: 0.0,
            average_capacity: 0.0,
            reward_rate: 0.0,
            macro_factor: 0.0,
            providers,
        };
        state.refresh_capacity();
        state
    }

    /// Recomputes provider count and capacity totals from the provider collection
    pub fn refresh_capacity(&mut self) {
        self.active_providers = self.providers.len();
        self.total_capacity = bounded(self.providers.iter().map(|p| p.capacity).sum(), 0.0);
        self.average_capacity = if self.active_providers > 0 {
            self.total_capacity / self.active_providers as f64
        } else {
            0.0
        };
    }

    /// Returns the name of the first tracked field that is NaN or infinite
    pub fn first_non_finite(&self) -> Option<&'static str> {
        Metric::ALL
            .iter()
            .find(|metric| !metric.value(self).is_finite())
            .map(|metric| metric.name())
    }
}

/// Full ordered state history of one trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    /// Index of this run within the batch
    pub run: usize,
    /// Seed the run's random source was built from
    pub seed: u64,
    pub history: Vec<SimulationState>,
}

impl SimulationRun {
    pub fn new(run: usize, seed: u64) -> Self {
        Self { run, seed, history: Vec::new() }
    }

    pub fn push(&mut self, state: SimulationState) {
        self.history.push(state);
    }

    pub fn last(&self) -> Option<&SimulationState> {
        self.history.last()
    }
}

// ------------------------------------------------------------------------------------------------
// Metrics and aggregated statistics
// ------------------------------------------------------------------------------------------------

/// Metrics tracked across runs
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TokenPrice,
    CirculatingSupply,
    Demand,
    Providers,
    TotalCapacity,
    ServicePrice,
    NetFlow,
    TokensBought,
    TokensSold,
    RewardRate,
    MacroFactor,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::TokenPrice,
        Metric::CirculatingSupply,
        Metric::Demand,
        Metric::Providers,
        Metric::TotalCapacity,
        Metric::ServicePrice,
        Metric::NetFlow,
        Metric::TokensBought,
        Metric::TokensSold,
        Metric::RewardRate,
        Metric::MacroFactor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::TokenPrice => "token_price",
            Metric::CirculatingSupply => "circulating_supply",
            Metric::Demand => "demand",
            Metric::Providers => "providers",
            Metric::TotalCapacity => "total_capacity",
            Metric::ServicePrice => "service_price",
            Metric::NetFlow => "net_flow",
            Metric::TokensBought => "tokens_bought",
            Metric::TokensSold => "tokens_sold",
            Metric::RewardRate => "reward_rate",
            Metric::MacroFactor => "macro_factor",
        }
    }

    /// Reads this metric out of a state snapshot
    pub fn value(&self, state: &SimulationState) -> f64 {
        match self {
            Metric::TokenPrice => state.token_price,
            Metric::CirculatingSupply => state.circulating_supply,
            Metric::Demand => state.demand,
            Metric::Providers => state.active_providers as f64,
            Metric::TotalCapacity => state.total_capacity,
            Metric::ServicePrice => state.service_price,
            Metric::NetFlow => state.net_flow,
            Metric::TokensBought => state.tokens_bought,
            Metric::TokensSold => state.tokens_sold,
            Metric::RewardRate => state.reward_rate,
            Metric::MacroFactor => state.macro_factor,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cross-run statistics of one metric at one timestep
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub p10: f64,
    pub p90: f64,
}

/// Cross-run statistical summary of every tracked metric at one timestep
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedStep {
    pub timestep: u64,
    pub token_price: MetricStats,
    pub circulating_supply: MetricStats,
    pub demand: MetricStats,
    pub providers: MetricStats,
    pub total_capacity: MetricStats,
    pub service_price: MetricStats,
    pub net_flow: MetricStats,
    pub tokens_bought: MetricStats,
    pub tokens_sold: MetricStats,
    pub reward_rate: MetricStats,
    pub macro_factor: MetricStats,
}

impl AggregatedStep {
    pub fn new(timestep: u64) -> Self {
        Self { timestep, ..Default::default() }
    }

    pub fn get(&self, metric: Metric) -> &MetricStats {
        match metric {
            Metric::TokenPrice => &self.token_price,
            Metric::CirculatingSupply => &self.circulating_supply,
            Metric::Demand => &self.demand,
            Metric::Providers => &self.providers,
            Metric::TotalCapacity => &self.total_capacity,
            Metric::ServicePrice => &self.service_price,
            Metric::NetFlow => &self.net_flow,
            Metric::TokensBought => &self.tokens_bought,
            Metric::TokensSold => &self.tokens_sold,
            Metric::RewardRate => &self.reward_rate,
            Metric::MacroFactor => &self.macro_factor,
        }
    }

    pub fn get_mut(&mut self, metric: Metric) -> &mut MetricStats {
        match metric {
            Metric::TokenPrice => &mut self.token_price,
            Metric::CirculatingSupply => &mut self.circulating_supply,
            Metric::Demand => &mut self.demand,
            Metric::Providers => &mut self.providers,
            Metric::TotalCapacity => &mut self.total_capacity,
            Metric::ServicePrice => &mut self.service_price,
            Metric::NetFlow => &mut self.net_flow,
            Metric::TokensBought => &mut self.tokens_bought,
            Metric::TokensSold => &mut self.tokens_sold,
            Metric::RewardRate => &mut self.reward_rate,
            Metric::MacroFactor => &mut self.macro_factor,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Results
// ------------------------------------------------------------------------------------------------

/// Descriptive data recorded alongside every result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub config: SimulationConfig,
    pub params: SimulationParams,
    /// Base seed actually used; run `i` used `seed + i`
    pub seed: u64,
    pub timesteps: u64,
    pub runs: usize,
    pub compute_time_ms: u128,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Output of a complete multi-run simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResults {
    /// One entry per timestep, `0..=timesteps`
    pub aggregated: Vec<AggregatedStep>,
    /// Per-run histories, present only when raw retention was requested
    pub raw: Option<Vec<SimulationRun>>,
    pub metadata: ResultMetadata,
}
