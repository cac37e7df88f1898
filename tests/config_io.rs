use depin_sim::{
    config::{ConfigInput, DemandScenario, MacroCondition, ProtocolParams, SimulationConfig, SimulationParams},
    resolve, run_simulation,
};

#[test]
fn test_partial_toml_input_is_filled_from_defaults() {
    let input: ConfigInput = toml::from_str(
        r#"
        [demand]
        scenario = "growth"
        growth_rate = 0.05

        [providers]
        initial_providers = 3
        "#,
    )
    .expect("partial input should parse");

    assert_eq!(input.demand.growth_rate, 0.05);
    assert_eq!(input.demand.base_demand, 1000.0);
    assert_eq!(input.protocol, ProtocolParams::default());
    assert_eq!(input.providers.initial_providers, 3);

    let config = resolve(&input).expect("input should resolve");
    assert_eq!(config.demand.scenario, DemandScenario::Growth { rate: 0.05 });
    assert_eq!(config.macro_conditions.condition, MacroCondition::Sideways);
}

#[test]
fn test_scenario_serializes_with_its_knob() {
    let mut config = SimulationConfig::default();
    config.demand.scenario = DemandScenario::Volatile { volatility: 0.4 };
    config.macro_conditions.condition = MacroCondition::Bearish;

    let json = serde_json::to_value(&config).expect("config serializes");
    assert_eq!(json["demand"]["scenario"]["type"], "volatile");
    assert_eq!(json["demand"]["scenario"]["volatility"], 0.4);
    assert_eq!(json["macro_conditions"]["condition"], "bearish");

    let back: SimulationConfig = serde_json::from_value(json).expect("config deserializes");
    assert_eq!(back, config);
}

#[test]
fn test_results_carry_reproduction_metadata() {
    let params = SimulationParams { runs: 3, timesteps: 6, seed: Some(21), retain_raw: false };
    let results = run_simulation(&SimulationConfig::default(), &params).expect("simulation should complete");

    let json = serde_json::to_value(&results).expect("results serialize");
    assert_eq!(json["metadata"]["seed"], 21);
    assert_eq!(json["metadata"]["runs"], 3);
    assert_eq!(json["metadata"]["params"]["timesteps"], 6);
    assert!(json["metadata"]["generated_at"].is_string());
    assert!(json["raw"].is_null());
    assert_eq!(json["aggregated"].as_array().map(|a| a.len()), Some(7));
    assert!(json["aggregated"][0]["token_price"]["p90"].is_number());
}
