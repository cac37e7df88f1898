mod distribution;

use crate::types::{Provider, ProviderId};

pub(crate) fn provider(id: u64, capacity: f64, cost: f64) -> Provider {
    Provider::new(ProviderId(id), capacity, cost, 0)
}
