//! Central registry for all simulation types in the simulator.
//! Maps simulation types to their display name and execution logic.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use crate::config::ConfigError;
use crate::interface::SimulationType;
use crate::scenarios::{
    run_all::run_all_simulations,
    sim_compare_demand::run_compare_demand_simulation,
    sim_simple::run_simple_simulation,
    sim_sweep_burn_fraction::run_sweep_burn_fraction_simulation,
    sim_sweep_inflow_rate::run_sweep_inflow_rate_simulation,
};

pub type SimulationFuture = Pin<Box<dyn Future<Output = Result<(), ConfigError>> + Send>>;

/// A runnable simulation type
pub struct RegisteredSimulation {
    pub name: &'static str,
    pub run_fn: Box<dyn Fn() -> SimulationFuture + Send + Sync>,
}

/// Registry that holds all simulation configurations
pub struct SimulationRegistry {
    simulations: HashMap<SimulationType, RegisteredSimulation>,
}

impl Default for SimulationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationRegistry {
    pub fn new() -> Self {
        let mut simulations = HashMap::new();

        simulations.insert(SimulationType::Simple, RegisteredSimulation {
            name: "Simple Simulation",
            run_fn: Box::new(|| -> SimulationFuture { Box::pin(run_simple_simulation()) }),
        });

        simulations.insert(SimulationType::SweepBurnFraction, RegisteredSimulation {
            name: "Burn Fraction Sweep",
            run_fn: Box::new(|| -> SimulationFuture {
                Box::pin(async { run_sweep_burn_fraction_simulation().await.map(|_| ()) })
            }),
        });

        simulations.insert(SimulationType::SweepInflowRate, RegisteredSimulation {
            name: "Inflow Rate Sweep",
            run_fn: Box::new(|| -> SimulationFuture {
                Box::pin(async { run_sweep_inflow_rate_simulation().await.map(|_| ()) })
            }),
        });

        simulations.insert(SimulationType::CompareDemand, RegisteredSimulation {
            name: "Demand Scenario Comparison",
            run_fn: Box::new(|| -> SimulationFuture {
                Box::pin(async { run_compare_demand_simulation().await.map(|_| ()) })
            }),
        });

        simulations.insert(SimulationType::RunAll, RegisteredSimulation {
            name: "All Simulations",
            run_fn: Box::new(|| -> SimulationFuture { Box::pin(run_all_simulations()) }),
        });

        Self { simulations }
    }

    pub fn get(&self, simulation_type: &SimulationType) -> Option<&RegisteredSimulation> {
        self.simulations.get(simulation_type)
    }
}

// Global registry instance
lazy_static::lazy_static! {
    static ref REGISTRY: SimulationRegistry = SimulationRegistry::new();
}

/// Get a reference to the global registry
pub fn get_registry() -> &'static SimulationRegistry {
    &REGISTRY
}
