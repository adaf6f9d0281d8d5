//! UI state and the single render function that turns it into a [`Screen`].
//!
//! Every visibility flag is derived from one [`UiState`] value, so two modes
//! can never be shown at once.

use crate::models::PriceReport;

// ---------------------------------------------------------------------------
// UiState
// ---------------------------------------------------------------------------

/// The controller's current mode. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Idle,
    CameraActive,
    Preview,
    Loading,
    Results(PriceReport),
    Error {
        message: String,
        /// Force the item-name entry panel open.
        manual_entry: bool,
    },
}

impl UiState {
    pub fn error(message: impl Into<String>) -> Self {
        UiState::Error {
            message: message.into(),
            manual_entry: false,
        }
    }

    pub fn error_with_manual_entry(message: impl Into<String>) -> Self {
        UiState::Error {
            message: message.into(),
            manual_entry: true,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// A page region that can be scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Results,
    Error,
}

/// Everything a view layer needs to draw the current state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screen {
    pub video_visible: bool,
    pub start_camera_visible: bool,
    pub capture_visible: bool,
    /// Data-URL of the still image, when the preview is shown.
    pub preview: Option<String>,
    pub manual_entry_visible: bool,
    /// Focus the item-name input.
    pub focus_item_input: bool,
    pub loading_visible: bool,
    pub results_visible: bool,
    pub item_name: Option<String>,
    pub results_html: Option<String>,
    pub error_message: Option<String>,
    pub scroll_to: Option<Region>,
}

/// Derive the screen from the state, the current preview image and the
/// user-toggled manual-entry flag.
pub fn render(state: &UiState, preview: Option<&str>, manual_entry: bool) -> Screen {
    let preview = preview.map(str::to_string);
    let mut screen = Screen {
        start_camera_visible: true,
        manual_entry_visible: manual_entry,
        ..Screen::default()
    };

    match state {
        UiState::Idle => {}
        UiState::CameraActive => {
            screen.video_visible = true;
            screen.start_camera_visible = false;
            screen.capture_visible = true;
        }
        UiState::Preview => {
            screen.preview = preview;
        }
        UiState::Loading => {
            screen.preview = preview;
            screen.loading_visible = true;
        }
        UiState::Results(report) => {
            screen.preview = preview;
            screen.results_visible = true;
            screen.item_name = Some(report.item_name.clone());
            screen.results_html = Some(results_html(report));
            screen.scroll_to = Some(Region::Results);
        }
        UiState::Error {
            message,
            manual_entry: forced,
        } => {
            screen.preview = preview;
            screen.error_message = Some(message.clone());
            screen.scroll_to = Some(Region::Error);
            if *forced {
                screen.manual_entry_visible = true;
                screen.focus_item_input = true;
            }
        }
    }

    screen
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format a price as dollars with exactly two decimals.
///
/// Exact half-cent ties round away from zero; `{:.2}` alone would round them
/// to even.
pub fn format_price(value: f64) -> String {
    let cents = value * 100.0;
    let exact = value.mul_add(100.0, -cents) == 0.0;
    if exact && cents.fract().abs() == 0.5 {
        format!("${:.2}", cents.round() / 100.0)
    } else {
        format!("${:.2}", value)
    }
}

/// Markup for the price cards and the sample price list.
pub fn results_html(report: &PriceReport) -> String {
    let info = &report.price_info;
    let mut html = String::new();

    for (label, value) in [
        ("Average Price", info.average_price),
        ("Lowest Price", info.min_price),
        ("Highest Price", info.max_price),
    ] {
        html.push_str(&format!(
            "<div class=\"price-card\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
            label,
            format_price(value)
        ));
    }

    let samples = info.sample_prices();
    if !samples.is_empty() {
        html.push_str(&format!(
            "<div class=\"price-list\"><h3>Sample Prices Found ({} total)</h3><ul>",
            info.total_count()
        ));
        for price in samples {
            html.push_str(&format!("<li>{}</li>", format_price(*price)));
        }
        html.push_str("</ul></div>");
    }

    html
}

/// Plain-text summary of a report, one value per line.
pub fn results_text(report: &PriceReport) -> String {
    let info = &report.price_info;
    let mut text = format!(
        "{}\nAverage: {}\nLowest: {}\nHighest: {}",
        report.item_name,
        format_price(info.average_price),
        format_price(info.min_price),
        format_price(info.max_price)
    );
    let samples: Vec<String> = info.sample_prices().iter().map(|p| format_price(*p)).collect();
    if !samples.is_empty() {
        text.push_str(&format!("\nSamples: {}", samples.join(" / ")));
    }
    text
}
