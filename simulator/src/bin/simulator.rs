use anyhow::{anyhow, bail, Context};
use depin_sim::utils::logging;
use simulator::{
    config::RESULTS_DIR,
    interface::{SimulationType, SimulatorInterface},
    run_simulation::install_interrupt_handler,
    simulation_registry::get_registry,
};
use std::env;
use std::fs;
use std::path::Path;

// ------------------------------------------------------------------------------------------------
// Main
// ------------------------------------------------------------------------------------------------

/// Runs the simulation named on the command line, or asks for one
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fs::create_dir_all(RESULTS_DIR).context("Failed to create results directory")?;
    setup_logging();

    let interface = SimulatorInterface::new();
    let simulation_type = match env::args().nth(1) {
        Some(arg) => SimulationType::from_input(&arg).ok_or_else(|| {
            anyhow!("Unknown simulation type '{}'\n{}", arg, interface.get_menu_text())
        })?,
        None => {
            interface.show_menu();
            match interface.get_user_choice()? {
                Some(choice) => choice,
                None => bail!("Invalid choice"),
            }
        }
    };
    if simulation_type == SimulationType::Exit {
        return Ok(());
    }

    let simulation = get_registry()
        .get(&simulation_type)
        .ok_or_else(|| anyhow!("No simulation registered for {:?}", simulation_type))?;
    println!("Running {}", simulation.name);
    install_interrupt_handler();
    (simulation.run_fn)()
        .await
        .with_context(|| format!("{} failed", simulation.name))?;
    println!("{} completed successfully!", simulation.name);
    Ok(())
}

/// Sets up logging if ENABLE_LOGS environment variable is set
fn setup_logging() {
    if env::var("ENABLE_LOGS").is_ok() {
        let log_path = Path::new(RESULTS_DIR).join("simulation.log");
        env::set_var("DEPINSIM_LOGGING", "true");
        env::set_var("DEPINSIM_LOG_FILE", &log_path);
        logging::init_logging();
    }
}
