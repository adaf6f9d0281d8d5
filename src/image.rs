//! Data-URL encoding for captured frames and local files.

use crate::camera::Snapshot;
use crate::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::Path;

/// Build a `data:<mime>;base64,<payload>` string.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

pub fn snapshot_data_url(snapshot: &Snapshot) -> String {
    data_url(&snapshot.mime, &snapshot.bytes)
}

/// Guess an image MIME type from a file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Read a local file into a data-URL.
pub fn read_file_data_url(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(data_url(mime_for_path(path), &bytes))
}
