use serde::{Deserialize, Serialize};

use super::price::{PriceInfo, PriceReport};
use crate::config;

// ---------------------------------------------------------------------------
// ScanRequest — Body of a /scan or /search call
// ---------------------------------------------------------------------------

/// A single lookup request. Built per user action and sent once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanRequest {
    /// A data-URL encoded image.
    Image { image: String },
    /// A typed item name.
    Name { item_name: String },
}

impl ScanRequest {
    pub fn image(data_url: impl Into<String>) -> Self {
        ScanRequest::Image {
            image: data_url.into(),
        }
    }

    pub fn name(item_name: impl Into<String>) -> Self {
        ScanRequest::Name {
            item_name: item_name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ScanStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    Success,
    RecognitionFailed,
    NoPricesFound,
    #[serde(other)]
    Unknown,
}

// ---------------------------------------------------------------------------
// ScanResponse — Shared response shape of /scan and /search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResponse {
    #[serde(default)]
    pub status: Option<ScanStatus>,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub price_info: Option<PriceInfo>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ScanResponse {
    /// Returns the renderable report when the lookup succeeded with prices.
    pub fn report(&self) -> Option<PriceReport> {
        match (&self.status, &self.price_info) {
            (Some(ScanStatus::Success), Some(info)) => Some(PriceReport {
                item_name: self
                    .item_name
                    .clone()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| config::UNKNOWN_ITEM.to_string()),
                price_info: info.clone(),
            }),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// HealthStatus — Response of the /health check
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
