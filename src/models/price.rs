use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceInfo — Aggregated price statistics returned by the lookup service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceInfo {
    pub average_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    #[serde(default)]
    pub prices: Vec<f64>,
    #[serde(default)]
    pub price_count: Option<u64>,
}

impl PriceInfo {
    /// Sample prices to display, capped at `price_count` when the service
    /// sent one.
    pub fn sample_prices(&self) -> &[f64] {
        let cap = self
            .price_count
            .and_then(|c| usize::try_from(c).ok())
            .unwrap_or(usize::MAX);
        &self.prices[..self.prices.len().min(cap)]
    }

    /// Total number of prices found, falling back to the sample size.
    pub fn total_count(&self) -> u64 {
        self.price_count.unwrap_or(self.prices.len() as u64)
    }
}

// ---------------------------------------------------------------------------
// PriceReport — A successful lookup, ready for rendering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PriceReport {
    pub item_name: String,
    pub price_info: PriceInfo,
}
