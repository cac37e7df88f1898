//! Drives one engine simulation from the async simulator.
//!
//! The engine is CPU bound and runs on rayon, so it is moved onto a blocking task. Each
//! completed run ticks a progress bar. A single Ctrl-C listener per process cancels the
//! shared interrupt token, which every simulation and sweep of the invocation observes.

use depin_sim::utils::logging;
use depin_sim::{
    run_simulation_with, CancellationToken, SimulationConfig, SimulationError, SimulationParams, SimulationResults,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Once;

use crate::config::ConfigError;

lazy_static::lazy_static! {
    static ref INTERRUPT: CancellationToken = CancellationToken::new();
}

static INSTALL_HANDLER: Once = Once::new();

/// Starts the process-wide Ctrl-C listener. Must run inside the tokio runtime; later calls are no-ops.
///
/// The first Ctrl-C cancels the shared token so runs stop at the next timestep; a second one exits.
pub fn install_interrupt_handler() {
    INSTALL_HANDLER.call_once(|| {
        let interrupt = interrupt_token();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_err() {
                logging::log("SIMULATOR", "Could not listen for Ctrl-C");
                return;
            }
            logging::log("SIMULATOR", "Interrupted, cancelling remaining runs");
            println!("Interrupted, finishing the current timestep (Ctrl-C again to exit)");
            interrupt.cancel();

            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(130);
            }
        });
    });
}

/// The token cancelled by Ctrl-C
pub fn interrupt_token() -> CancellationToken {
    INTERRUPT.clone()
}

/// Errors with `Cancelled` once `cancel` has fired
pub fn check_interrupted(cancel: &CancellationToken) -> Result<(), ConfigError> {
    if cancel.is_cancelled() {
        return Err(SimulationError::Cancelled.into());
    }
    Ok(())
}

/// Runs `params.runs` trials of `config` with a progress bar labelled `label`, stopping on Ctrl-C
pub async fn run_simulation(
    label: &str,
    config: SimulationConfig,
    params: SimulationParams,
) -> Result<SimulationResults, ConfigError> {
    run_cancellable(label, config, params, interrupt_token()).await
}

/// Like [`run_simulation`], observing `cancel` instead of the process interrupt token
pub async fn run_cancellable(
    label: &str,
    config: SimulationConfig,
    params: SimulationParams,
    cancel: CancellationToken,
) -> Result<SimulationResults, ConfigError> {
    let progress_bar = create_progress_bar(params.runs as u64, label);

    let bar = progress_bar.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        run_simulation_with(&config, &params, &cancel, |_| bar.inc(1))
    })
    .await;

    match outcome {
        Ok(Ok(results)) => {
            progress_bar.finish_with_message(format!(
                "{}: {} runs in {} ms",
                label, results.metadata.runs, results.metadata.compute_time_ms
            ));
            Ok(results)
        }
        Ok(Err(e)) => {
            progress_bar.abandon_with_message(format!("{}: {}", label, e));
            Err(e.into())
        }
        Err(join_error) => {
            progress_bar.abandon();
            Err(ConfigError::TaskError(join_error.to_string()))
        }
    }
}

fn create_progress_bar(runs: u64, label: &str) -> ProgressBar {
    let progress_bar = ProgressBar::new(runs);
    match ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} runs {msg}") {
        Ok(style) => progress_bar.set_style(style.progress_chars("+>-")),
        Err(e) => logging::log("SIMULATOR", &format!("Falling back to default progress style: {}", e)),
    }
    progress_bar.set_message(label.to_string());
    progress_bar
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SimulationParams {
        SimulationParams { runs: 2, timesteps: 5, seed: Some(4), retain_raw: false }
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_the_simulation() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = run_cancellable("cancelled", SimulationConfig::default(), params(), cancel.clone()).await;
        assert!(matches!(outcome, Err(ConfigError::SimulationError(SimulationError::Cancelled))));
        assert!(matches!(
            check_interrupted(&cancel),
            Err(ConfigError::SimulationError(SimulationError::Cancelled))
        ));
    }

    #[tokio::test]
    async fn test_token_is_shared_across_simulations() {
        let cancel = CancellationToken::new();
        let first = run_cancellable("first", SimulationConfig::default(), params(), cancel.clone()).await;
        assert!(first.is_ok());
        assert!(check_interrupted(&cancel).is_ok());

        cancel.cancel();
        let second = run_cancellable("second", SimulationConfig::default(), params(), cancel).await;
        assert!(matches!(second, Err(ConfigError::SimulationError(SimulationError::Cancelled))));
    }

    #[tokio::test]
    async fn test_handler_installs_once() {
        install_interrupt_handler();
        install_interrupt_handler();
        assert!(!interrupt_token().is_cancelled());
    }
}
