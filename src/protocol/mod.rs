//! Protocol-side rules: turning paid demand into mint/burn flows and repricing.

pub mod executor;
pub mod pricing;

pub use executor::{execute_service, ServiceOutcome};
pub use pricing::{update_service_price, update_token_price};
