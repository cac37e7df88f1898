//! End-of-simulation statistics for the simulator.
//! Summarizes throughput, the final aggregated step and, when raw runs were kept, the
//! spread of terminal token prices across runs.

use depin_sim::aggregate::{histogram, summarize, terminal_distribution, HistogramBin};
use depin_sim::{AggregatedStep, Metric, MetricStats, SimulationResults};

// ------------------------------------------------------------------------------------------------
// Statistics Tracking
// ------------------------------------------------------------------------------------------------

/// Bins used for the terminal price histogram
pub const HISTOGRAM_BINS: usize = 10;

/// Widest histogram bar, in characters
const BAR_WIDTH: usize = 40;

/// Summary of a finished simulation
pub struct SimulatorStats {
    /// Number of runs simulated
    runs: usize,
    /// Periods per run
    timesteps: u64,
    /// Wall-clock compute time reported by the engine
    compute_time_ms: u128,
    /// Aggregated statistics of the last timestep
    final_step: Option<AggregatedStep>,
    /// Distribution of final token prices, only with raw runs
    terminal_price: Option<(MetricStats, Vec<HistogramBin>)>,
    /// Diagnostic warnings raised for the aggregated series
    warnings: Vec<String>,
}

impl SimulatorStats {
    pub fn from_results(results: &SimulationResults, warnings: Vec<String>) -> Self {
        let terminal_price = results.raw.as_ref().map(|runs| {
            let prices = terminal_distribution(runs, Metric::TokenPrice);
            (summarize(&prices), histogram(&prices, HISTOGRAM_BINS))
        });
        Self {
            runs: results.metadata.runs,
            timesteps: results.metadata.timesteps,
            compute_time_ms: results.metadata.compute_time_ms,
            final_step: results.aggregated.last().cloned(),
            terminal_price,
            warnings,
        }
    }

    /// Runs completed per second of compute time
    pub fn runs_per_second(&self) -> f64 {
        if self.compute_time_ms == 0 {
            return 0.0;
        }
        self.runs as f64 / (self.compute_time_ms as f64 / 1000.0)
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Prints the final statistics including the terminal distribution
    pub fn print_final_stats(&self) {
        println!("SIMULATOR: === Final Statistics ===");
        println!("SIMULATOR: Runs: {} x {} timesteps", self.runs, self.timesteps);
        println!(
            "SIMULATOR: Compute Time: {} ms ({:.1} runs/s)",
            self.compute_time_ms,
            self.runs_per_second()
        );
        if let Some(step) = &self.final_step {
            for metric in [Metric::TokenPrice, Metric::CirculatingSupply, Metric::Providers, Metric::Demand] {
                let s = step.get(metric);
                println!(
                    "SIMULATOR: Final {}: mean {:.4}, p10 {:.4}, p90 {:.4}",
                    metric, s.mean, s.p10, s.p90
                );
            }
        }
        if let Some((stats, bins)) = &self.terminal_price {
            println!(
                "SIMULATOR: Terminal token price: median {:.4}, min {:.4}, max {:.4}",
                stats.median, stats.min, stats.max
            );
            for line in format_histogram(bins) {
                println!("SIMULATOR:   {}", line);
            }
        }
        for warning in &self.warnings {
            println!("SIMULATOR: WARNING: {}", warning);
        }
    }
}

/// One text line per bin, bars scaled to the fullest bin
pub fn format_histogram(bins: &[HistogramBin]) -> Vec<String> {
    let largest = bins.iter().map(|b| b.count).max().unwrap_or(0);
    bins.iter()
        .map(|bin| {
            let width = if largest == 0 { 0 } else { bin.count * BAR_WIDTH / largest };
            format!(
                "[{:>12.4}, {:>12.4}] {:>5} {}",
                bin.lower,
                bin.upper,
                bin.count,
                "#".repeat(width)
            )
        })
        .collect()
}
