pub mod utils;
pub mod sweep_runner;

pub mod sim_simple;
pub mod sim_sweep_burn_fraction;
pub mod sim_sweep_inflow_rate;
pub mod sim_compare_demand;
pub mod run_all;
