use super::provider;
use crate::providers::ProviderPool;

#[test]
fn test_rewards_accrue_and_cover_cost() {
    // 100 capacity at 0.5 tokens/unit earns 50 tokens; cost $20 at $2/token sells 10
    let mut pool = ProviderPool::from_providers(vec![provider(0, 100.0, 20.0)]);
    let summary = pool.distribute(0.5, 2.0);

    assert!((summary.tokens_distributed - 50.0).abs() < 1e-12);
    assert!((summary.tokens_sold - 10.0).abs() < 1e-12);

    let p = &pool.providers()[0];
    assert!((p.balance - 40.0).abs() < 1e-12);
    assert_eq!(p.last_profit(), Some(80.0));
}

#[test]
fn test_sale_is_capped_by_balance() {
    // Earns 5 tokens worth $5 against a $20 cost: sells everything, records a loss
    let mut pool = ProviderPool::from_providers(vec![provider(0, 10.0, 20.0)]);
    let summary = pool.distribute(0.5, 1.0);

    assert!((summary.tokens_sold - 5.0).abs() < 1e-12);
    let p = &pool.providers()[0];
    assert_eq!(p.balance, 0.0);
    assert_eq!(p.last_profit(), Some(-15.0));
}

#[test]
fn test_zero_reward_rate_records_full_cost_as_loss() {
    let mut pool = ProviderPool::from_providers(vec![provider(0, 10.0, 7.0), provider(1, 30.0, 0.0)]);
    let summary = pool.distribute(0.0, 1.0);
    assert_eq!(summary.tokens_distributed, 0.0);
    assert_eq!(summary.tokens_sold, 0.0);
    assert_eq!(pool.providers()[0].last_profit(), Some(-7.0));
    assert_eq!(pool.providers()[1].last_profit(), Some(0.0));
}

#[test]
fn test_distribution_sums_over_population() {
    let mut pool = ProviderPool::from_providers(vec![
        provider(0, 100.0, 10.0),
        provider(1, 50.0, 10.0),
        provider(2, 25.0, 10.0),
    ]);
    assert!((pool.total_capacity() - 175.0).abs() < 1e-12);
    let summary = pool.distribute(2.0, 1.0);
    assert!((summary.tokens_distributed - 350.0).abs() < 1e-12);
    assert!((summary.tokens_sold - 30.0).abs() < 1e-12);
}
