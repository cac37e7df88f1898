//! Writing simulation results to disk.
//! Each saved simulation gets `results.json` (everything, pretty printed) and
//! `aggregated.csv` (one row per timestep and metric).

use depin_sim::utils::logging;
use depin_sim::{AggregatedStep, Metric, SimulationResults};
use std::fmt::Write as _;
use std::path::Path;

use crate::config::ConfigError;

pub const RESULTS_FILE: &str = "results.json";
pub const CSV_FILE: &str = "aggregated.csv";
pub const CSV_HEADER: &str = "timestep,metric,mean,std,min,max,median,p10,p90";

/// Flattens the aggregated series into CSV text
pub fn aggregated_csv(aggregated: &[AggregatedStep]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for step in aggregated {
        for metric in Metric::ALL {
            let s = step.get(metric);
            // Writing into a String cannot fail
            let _ = writeln!(
                csv,
                "{},{},{},{},{},{},{},{},{}",
                step.timestep,
                metric.name(),
                s.mean,
                s.std,
                s.min,
                s.max,
                s.median,
                s.p10,
                s.p90
            );
        }
    }
    csv
}

/// Saves `results` as JSON and CSV into `dir`, creating it if needed
pub async fn save_results(results: &SimulationResults, dir: &Path) -> Result<(), ConfigError> {
    create_dir(dir).await?;

    let json_path = dir.join(RESULTS_FILE);
    write_file(&json_path, serde_json::to_string_pretty(results)?).await?;

    let csv_path = dir.join(CSV_FILE);
    write_file(&csv_path, aggregated_csv(&results.aggregated)).await?;

    logging::log(
        "SIMULATOR",
        &format!("Saved results to {} and {}", json_path.display(), csv_path.display()),
    );
    Ok(())
}

/// Saves an arbitrary serializable summary as pretty JSON
pub async fn save_json<T: serde::Serialize>(value: &T, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        create_dir(parent).await?;
    }
    write_file(path, serde_json::to_string_pretty(value)?).await
}

async fn create_dir(dir: &Path) -> Result<(), ConfigError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ConfigError::ResultsError {
            path: dir.display().to_string(),
            source,
        })
}

async fn write_file(path: &Path, contents: String) -> Result<(), ConfigError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ConfigError::ResultsError {
            path: path.display().to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use depin_sim::MetricStats;

    fn step(timestep: u64, price_mean: f64) -> AggregatedStep {
        let mut step = AggregatedStep::new(timestep);
        *step.get_mut(Metric::TokenPrice) = MetricStats {
            mean: price_mean,
            std: 0.5,
            min: 1.0,
            max: 3.0,
            median: 2.0,
            p10: 1.2,
            p90: 2.8,
        };
        step
    }

    #[test]
    fn test_csv_has_one_row_per_timestep_and_metric() {
        let csv = aggregated_csv(&[step(0, 2.0), step(1, 2.5)]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 1 + 2 * Metric::ALL.len());
        for line in &lines[1..] {
            assert_eq!(line.split(',').count(), 9);
        }
    }

    #[test]
    fn test_csv_row_carries_every_statistic() {
        let csv = aggregated_csv(&[step(3, 2.5)]);
        let row = csv
            .lines()
            .find(|l| l.split(',').nth(1) == Some(Metric::TokenPrice.name()))
            .expect("token price row");
        assert_eq!(row, format!("3,{},2.5,0.5,1,3,2,1.2,2.8", Metric::TokenPrice.name()));
    }

    #[test]
    fn test_empty_series_is_header_only() {
        assert_eq!(aggregated_csv(&[]), format!("{}\n", CSV_HEADER));
    }

    #[tokio::test]
    async fn test_save_results_writes_both_files() {
        let params = depin_sim::SimulationParams { runs: 2, timesteps: 3, seed: Some(4), retain_raw: false };
        let results = depin_sim::run_simulation(&depin_sim::SimulationConfig::default(), &params)
            .expect("simulation should complete");

        let dir = std::env::temp_dir().join(format!("depin-sim-results-{}", std::process::id()));
        save_results(&results, &dir).await.expect("results should save");

        let json = std::fs::read_to_string(dir.join(RESULTS_FILE)).expect("json written");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("json parses back");
        assert_eq!(parsed["aggregated"].as_array().map(|a| a.len()), Some(4));
        assert_eq!(parsed["metadata"]["seed"].as_u64(), Some(4));
        let csv = std::fs::read_to_string(dir.join(CSV_FILE)).expect("csv written");
        assert_eq!(csv.lines().count(), 1 + 4 * Metric::ALL.len());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
