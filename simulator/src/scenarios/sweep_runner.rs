use depin_sim::utils::logging;
use depin_sim::{diagnose, AggregatedStep, Metric, SimulationError};
use serde::Serialize;
use std::fmt::Debug;

use crate::config::{results_path, ConfigError, ScenarioConfig};
use crate::run_simulation::{check_interrupted, interrupt_token, run_simulation};
use crate::scenarios::utils::log_configuration;
use crate::simulation_results::{save_json, save_results};

/// Builds the configuration of one sweep point from the base file and the swept value
pub type ConfigModifier<T> = Box<dyn Fn(&ScenarioConfig, &T) -> ScenarioConfig + Send + Sync>;

/// Generic sweep runner shared by every parameter sweep
pub struct SweepRunner<T> {
    sweep_name: String,
    results_dir: String,
    parameter_name: String,
    parameter_values: Vec<T>,
    config_modifier: ConfigModifier<T>,
}

/// Outcome of one point of a sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint<T> {
    pub value: T,
    pub seed: u64,
    pub final_step: AggregatedStep,
    pub warnings: Vec<String>,
}

impl<T: Debug + Clone + Serialize + Send + Sync> SweepRunner<T> {
    pub fn new(
        sweep_name: &str,
        results_dir: &str,
        parameter_name: &str,
        parameter_values: Vec<T>,
        config_modifier: ConfigModifier<T>,
    ) -> Self {
        Self {
            sweep_name: sweep_name.to_string(),
            results_dir: results_dir.to_string(),
            parameter_name: parameter_name.to_string(),
            parameter_values,
            config_modifier,
        }
    }

    /// Configuration of the point at `value`
    pub fn point_config(&self, base: &ScenarioConfig, value: &T) -> ScenarioConfig {
        (self.config_modifier)(base, value)
    }

    /// Runs the complete sweep simulation.
    ///
    /// Every point runs from the same base seed, so the swept parameter is the only
    /// difference between points. Without a configured seed, the seed drawn for the
    /// first point is reused by the rest.
    pub async fn run(&self, base: &ScenarioConfig) -> Result<Vec<SweepPoint<T>>, ConfigError> {
        let total = self.parameter_values.len();
        self.log_sweep_start(total);
        println!("Running Sweep: {}", self.sweep_name);

        let data_dir = results_path(&self.results_dir).join("data");
        let mut seed = base.simulation.seed;
        let mut points = Vec::with_capacity(total);
        let interrupt = interrupt_token();

        for (sim_index, param_value) in self.parameter_values.iter().enumerate() {
            check_interrupted(&interrupt)?;
            logging::log(
                "SIMULATOR",
                &format!(
                    "Running simulation {}/{} with {}: {:?}",
                    sim_index + 1,
                    total,
                    self.parameter_name,
                    param_value
                ),
            );

            let mut sim_config = self.point_config(base, param_value);
            sim_config.simulation.seed = seed;
            log_configuration(&format!("{} {}/{}", self.sweep_name, sim_index + 1, total), &sim_config);

            let label = format!("{} {}/{} ({:?})", self.sweep_name, sim_index + 1, total, param_value);
            let resolved = sim_config
                .resolve()
                .map_err(|e| self.error_context(sim_index, total, param_value, e))?;
            let results = run_simulation(&label, resolved, sim_config.simulation.clone())
                .await
                .map_err(|e| self.error_context(sim_index, total, param_value, e))?;
            seed = Some(results.metadata.seed);

            save_results(&results, &data_dir.join(format!("sim_{}", sim_index)))
                .await
                .map_err(|e| self.error_context(sim_index, total, param_value, e))?;

            let warnings = diagnose(&results.aggregated);
            let final_step = results
                .aggregated
                .last()
                .cloned()
                .unwrap_or_else(|| AggregatedStep::new(0));
            points.push(SweepPoint {
                value: param_value.clone(),
                seed: results.metadata.seed,
                final_step,
                warnings,
            });
        }

        println!("Sweep simulation complete");
        save_sweep_results(&self.results_dir, &self.parameter_name, &points).await?;

        logging::log("SIMULATOR", "=== Sweep Simulation Complete ===");
        logging::log("SIMULATOR", &format!("Total simulations completed: {}", points.len()));
        Ok(points)
    }

    fn log_sweep_start(&self, total: usize) {
        logging::log("SIMULATOR", &format!("=== Sweep {} Simulation ===", self.sweep_name));
        logging::log("SIMULATOR", &format!("Number of simulations: {}", total));
        logging::log(
            "SIMULATOR",
            &format!("{} values: {:?}", self.parameter_name, self.parameter_values),
        );
        logging::log("SIMULATOR", "================================");
    }

    fn error_context(&self, sim_index: usize, total: usize, param_value: &T, e: ConfigError) -> ConfigError {
        if matches!(e, ConfigError::SimulationError(SimulationError::Cancelled)) {
            return e;
        }
        ConfigError::ValidationError(format!(
            "Sweep '{}' failed during simulation {}/{} with {}: {:?}. Error: {}",
            self.sweep_name,
            sim_index + 1,
            total,
            self.parameter_name,
            param_value,
            e
        ))
    }
}

/// Builds the combined sweep summary: final-step means side by side plus every point
pub fn sweep_summary<T: Serialize>(parameter_name: &str, points: &[SweepPoint<T>]) -> serde_json::Value {
    let final_means = |metric: Metric| -> Vec<f64> {
        points.iter().map(|p| p.final_step.get(metric).mean).collect()
    };

    let mut summary = serde_json::Map::new();
    summary.insert("num_simulations".to_string(), serde_json::json!(points.len()));
    summary.insert(
        format!("{}_values", parameter_name),
        serde_json::json!(points.iter().map(|p| &p.value).collect::<Vec<_>>()),
    );
    for metric in [Metric::TokenPrice, Metric::CirculatingSupply, Metric::Providers, Metric::Demand] {
        summary.insert(format!("final_{}_mean", metric.name()), serde_json::json!(final_means(metric)));
    }

    let individual: Vec<serde_json::Value> = points
        .iter()
        .map(|p| {
            serde_json::json!({
                parameter_name: &p.value,
                "seed": p.seed,
                "final_step": &p.final_step,
                "warnings": &p.warnings,
            })
        })
        .collect();

    serde_json::json!({
        "sweep_summary": summary,
        "individual_results": individual,
    })
}

/// Saves the combined sweep results next to the per-point data
pub async fn save_sweep_results<T: Serialize>(
    results_dir: &str,
    parameter_name: &str,
    points: &[SweepPoint<T>],
) -> Result<(), ConfigError> {
    let path = results_path(results_dir).join("data").join("sweep_results.json");
    save_json(&sweep_summary(parameter_name, points), &path).await?;
    logging::log("SIMULATOR", &format!("Saved combined sweep results to {}", path.display()));
    Ok(())
}
