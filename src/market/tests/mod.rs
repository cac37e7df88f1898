mod macro_regimes;

/// Demand parameters with noise switched off so results are exact
pub(crate) fn quiet_demand(scenario: crate::config::DemandScenario) -> crate::config::DemandParams {
    crate::config::DemandParams {
        scenario,
        base_demand: 1000.0,
        elasticity: 1.0,
        noise_level: 0.0,
    }
}
