#[derive(Debug, thiserror::Error)]
pub enum SnapPriceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Camera error: {0}")]
    Camera(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Controller busy: another operation is in flight")]
    Busy,

    #[error("Lock poisoned: {0}")]
    Poisoned(&'static str),
}

pub type Result<T> = std::result::Result<T, SnapPriceError>;
