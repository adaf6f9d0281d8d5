//! Capture-and-lookup client for a photo-based price lookup service.
//!
//! A [`Controller`] gets an image from a camera stream or a local file, or
//! takes a typed item name. It sends the input to the lookup service and
//! turns the JSON reply into a renderable [`Screen`]: price cards, a
//! sample list, or an error message with an optional manual name entry.
//!
//! The camera is abstracted behind [`camera::MediaDevices`]; the network
//! behind [`PriceLookup`], implemented over HTTP by [`PriceClient`].
//!
//! # Quick start
//!
//! ```no_run
//! use snapprice::SnapPrice;
//!
//! let mut client = SnapPrice::builder().build();
//!
//! // Search by name directly
//! use snapprice::PriceLookup;
//! let resp = client.search("desk lamp").unwrap();
//! if let Some(report) = resp.report() {
//!     println!("{}", snapprice::render::results_text(&report));
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod camera;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod image;
pub mod models;
pub mod render;

#[cfg(feature = "async")]
pub use async_client::AsyncController;
pub use client::{PriceClient, PriceLookup};
pub use controller::Controller;
pub use error::{Result, SnapPriceError};
pub use render::{Screen, UiState};

use camera::MediaDevices;
use std::time::Duration;

// ---------------------------------------------------------------------------
// SnapPriceBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring a [`PriceClient`] or a ready-wired [`Controller`].
///
/// Use [`SnapPrice::builder()`] to obtain a builder.
pub struct SnapPriceBuilder {
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for SnapPriceBuilder {
    fn default() -> Self {
        Self {
            base_url: config::API_URL.to_string(),
            timeout: None,
        }
    }
}

impl SnapPriceBuilder {
    /// Override the service base URL.
    ///
    /// Defaults to [`config::API_URL`] (`http://localhost:5000/api`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a request timeout.
    ///
    /// By default requests wait indefinitely, so a hung service leaves the
    /// controller in [`UiState::Loading`] until it answers.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the HTTP client. No connection is made until the first request.
    pub fn build(self) -> PriceClient {
        PriceClient::new(self.base_url, self.timeout)
    }

    /// Build a [`Controller`] over the given camera backend and a fresh client.
    pub fn controller<M: MediaDevices>(self, media: M) -> Controller<M, PriceClient> {
        Controller::new(media, self.build())
    }
}

// ---------------------------------------------------------------------------
// SnapPrice
// ---------------------------------------------------------------------------

/// Entry point for configuration.
pub struct SnapPrice;

impl SnapPrice {
    /// Create a new builder.
    pub fn builder() -> SnapPriceBuilder {
        SnapPriceBuilder::default()
    }
}
