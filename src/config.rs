pub const API_URL: &str = "http://localhost:5000/api";

pub const SCAN_PATH: &str = "scan";
pub const SEARCH_PATH: &str = "search";
pub const HEALTH_PATH: &str = "health";

/// JPEG quality used when encoding a captured camera frame.
pub const JPEG_QUALITY: f32 = 0.8;

// ---------------------------------------------------------------------------
// User-facing messages
// ---------------------------------------------------------------------------

pub const CAMERA_DENIED_MESSAGE: &str = "Could not access camera. Please check permissions.";
pub const CAPTURE_FAILED_MESSAGE: &str = "Could not capture a photo. Please start the camera again.";
pub const FILE_READ_MESSAGE: &str = "Could not read the selected file.";
pub const EMPTY_NAME_MESSAGE: &str = "Please enter an item name";
pub const RECOGNITION_FAILED_MESSAGE: &str =
    "Could not automatically recognize item. Please enter the item name manually.";
pub const NO_PRICES_MESSAGE: &str = "No prices found for this item. Try a different search term.";
pub const CONNECTIVITY_MESSAGE: &str =
    "Error connecting to server. Make sure the backend is running on http://localhost:5000";

pub const UNKNOWN_ITEM: &str = "Unknown Item";

/// Strip a trailing `/api` segment to obtain the server root, where the
/// health endpoint lives.
pub fn server_root(base_url: &str) -> &str {
    let trimmed = base_url.trim_end_matches('/');
    trimmed.strip_suffix("/api").unwrap_or(trimmed)
}
