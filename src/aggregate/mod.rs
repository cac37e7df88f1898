//! Cross-run statistics.
//!
//! Collapses N runs of T+1 snapshots into T+1 [`AggregatedStep`]s. Percentiles use linear
//! interpolation between the closest ranks of the ascending sample, index `p * (n - 1)`.

use serde::{Deserialize, Serialize};

use crate::types::constants::{P10, P50, P90};
use crate::types::{bounded, AggregatedStep, Metric, MetricStats, SimulationRun};


/// Percentile `p` in [0, 1] of an ascending-sorted sample. Empty input gives 0.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let index = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = index - lower as f64;
    // Weighted form, so spans wider than f64::MAX do not overflow
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

/// Mean, population standard deviation, extremes and percentiles of a sample
pub fn summarize(values: &[f64]) -> MetricStats {
    if values.is_empty() {
        return MetricStats::default();
    }
    let n = values.len() as f64;
    let mut mean = values.iter().sum::<f64>() / n;
    let mut std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    // Saturated runs overflow the plain sums; rescale before summing
    if !mean.is_finite() || !std.is_finite() {
        let scale = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        mean = scale * values.iter().map(|v| v / scale / n).sum::<f64>();
        let variance = values.iter().map(|v| (v / scale - mean / scale).powi(2)).sum::<f64>() / n;
        std = bounded(scale * variance.sqrt(), 0.0);
        mean = bounded(mean, -f64::MAX);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    MetricStats {
        mean,
        std,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        median: percentile(&sorted, P50),
        p10: percentile(&sorted, P10),
        p90: percentile(&sorted, P90),
    }
}

/// One aggregated record per timestep, across every run.
///
/// Runs are expected to share a horizon; a timestep missing from a shorter run is
/// aggregated over the runs that have it.
pub fn aggregate_runs(runs: &[SimulationRun]) -> Vec<AggregatedStep> {
    let steps = runs.iter().map(|r| r.history.len()).max().unwrap_or(0);
    let mut values = Vec::with_capacity(runs.len());

    (0..steps)
        .map(|t| {
            let timestep = runs
                .iter()
                .find_map(|r| r.history.get(t))
                .map(|s| s.timestep)
                .unwrap_or(t as u64);
            let mut step = AggregatedStep::new(timestep);
            for metric in Metric::ALL {
                values.clear();
                values.extend(runs.iter().filter_map(|r| r.history.get(t)).map(|s| metric.value(s)));
                *step.get_mut(metric) = summarize(&values);
            }
            step
        })
        .collect()
}

/// Values of one metric at the final timestep of every run
pub fn terminal_distribution(runs: &[SimulationRun], metric: Metric) -> Vec<f64> {
    runs.iter()
        .filter_map(|r| r.last())
        .map(|s| metric.value(s))
        .collect()
}

// ------------------------------------------------------------------------------------------------
// Histogram
// ------------------------------------------------------------------------------------------------

/// One equal-width bin, `[lower, upper)` except the last which also holds `upper`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram over the finite range of `values`.
///
/// Every input lands in exactly one bin, so counts always sum to `values.len()`. A bin
/// count of 0 is treated as 1; non-finite values are counted in the first bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let (min, max) = if min.is_finite() { (min, max) } else { (0.0, 0.0) };
    let width = (max - min) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for &v in values {
        let index = if width > 0.0 && v.is_finite() {
            (((v - min) / width).floor() as usize).min(bins - 1)
        } else {
            0
        };
        out[index].count += 1;
    }
    out
}
