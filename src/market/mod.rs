//! Exogenous market inputs: the macro regime drift and the demand for service.

pub mod demand;
pub mod macro_factor;

pub use demand::generate_demand;
pub use macro_factor::macro_factor;

#[cfg(test)]
mod tests;
