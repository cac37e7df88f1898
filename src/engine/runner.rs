use crate::config::SimulationConfig;
use crate::market::{generate_demand, macro_factor};
use crate::protocol::{execute_service, update_service_price, update_token_price};
use crate::providers::{ExitSummary, ProviderPool};
use crate::rng::SimRng;
use crate::types::{bounded, SimulationRun, SimulationState};

use super::{CancellationToken, SimulationError};

// ------------------------------------------------------------------------------------------------
// Single run
// ------------------------------------------------------------------------------------------------

/// Runs one trial of `timesteps` periods from the seeded initial state.
///
/// The returned history holds `timesteps + 1` snapshots, the first being t=0.
pub fn run_single(
    config: &SimulationConfig,
    timesteps: u64,
    run: usize,
    seed: u64,
    cancel: &CancellationToken,
) -> Result<SimulationRun, SimulationError> {
    let mut rng = SimRng::new(seed);
    let mut pool = ProviderPool::with_initial(&config.providers, config.providers.initial_providers, &mut rng);

    let mut history = SimulationRun::new(run, seed);
    let mut state = SimulationState::initial(config, pool.snapshot());
    history.push(state.clone());

    for t in 1..=timesteps {
        if cancel.is_cancelled() {
            return Err(SimulationError::Cancelled);
        }
        state = step(config, &state, &mut pool, &mut rng, t);
        if let Some(field) = state.first_non_finite() {
            return Err(SimulationError::NonFiniteState { timestep: t, field });
        }
        history.push(state.clone());
    }

    tracing::debug!(
        run,
        seed,
        providers = state.active_providers,
        token_price = state.token_price,
        "run complete"
    );
    Ok(history)
}

// ------------------------------------------------------------------------------------------------
// State transition
// ------------------------------------------------------------------------------------------------

/// Advances `previous` by one period.
///
/// Order matters: candidates judge onboarding on the previous period's reward rate and token
/// price; the executor then sets this period's reward rate from the post-onboarding capacity,
/// which is what providers are paid at. Both prices move last.
pub fn step(
    config: &SimulationConfig,
    previous: &SimulationState,
    pool: &mut ProviderPool,
    rng: &mut SimRng,
    timestep: u64,
) -> SimulationState {
    let protocol = &config.protocol;

    let macro_factor = macro_factor(&config.macro_conditions, rng);
    let previous_demand = (timestep > 1).then_some(previous.demand);
    let demand = generate_demand(
        &config.demand,
        timestep,
        previous_demand,
        previous.service_price,
        macro_factor,
        protocol.demand_macro_sensitivity,
        rng,
    );

    let onboarding = pool.onboard(
        &config.providers,
        previous.reward_rate,
        previous.token_price,
        timestep,
        rng,
    );
    let exits = if config.providers.exit_on_negative_profit {
        pool.remove_unprofitable()
    } else {
        ExitSummary::default()
    };

    let total_capacity = pool.total_capacity();
    let outcome = execute_service(
        protocol,
        previous.token_price,
        previous.service_price,
        total_capacity,
        demand,
    );

    let distribution = pool.distribute(outcome.reward_rate, previous.token_price);
    let tokens_sold = bounded(distribution.tokens_sold + exits.liquidated_tokens, 0.0);

    // Never burn more than exists
    let burned = outcome.burned.min(previous.circulating_supply + outcome.minted);
    let circulating_supply = bounded(previous.circulating_supply + outcome.minted - burned, 0.0);
    let net_flow = bounded(outcome.tokens_bought - tokens_sold, -f64::MAX);

    let service_price = update_service_price(protocol, previous.service_price, demand, total_capacity);
    let token_price = update_token_price(
        protocol,
        previous.token_price,
        outcome.tokens_bought,
        tokens_sold,
        circulating_supply,
        macro_factor,
    );

    tracing::trace!(
        timestep,
        candidates = onboarding.candidates,
        onboarded = onboarding.onboarded,
        exited = exits.exited.len(),
        demand,
        reward_rate = outcome.reward_rate,
        token_price,
        "step"
    );

    let mut next = SimulationState {
        timestep,
        token_price,
        circulating_supply,
        tokens_bought: outcome.tokens_bought,
        tokens_sold,
        tokens_minted: outcome.minted,
        tokens_burned: burned,
        net_flow,
        demand,
        service_price,
        active_providers: 0,
        total_capacity: 0.0,
        average_capacity: 0.0,
        reward_rate: outcome.reward_rate,
        macro_factor,
        providers: pool.snapshot(),
    };
    next.refresh_capacity();
    next
}
