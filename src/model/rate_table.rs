use serde::Deserialize;
use std::collections::BTreeMap;

/// Rates of every known currency against one base, as served upstream.
/// A body without `rates` (the provider's error reply) is an empty table.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RateTable {
    #[serde(default)]
    pub rates: BTreeMap<String, f64>,
}

impl RateTable {
    pub fn rate(&self, quote: &str) -> Option<f64> {
        self.rates.get(quote).copied()
    }

    pub fn currencies(&self) -> Vec<String> {
        self.rates.keys().cloned().collect()
    }
}
