//! The capture-and-lookup controller.
//!
//! Owns the camera session, the lookup backend and the UI state. All handles
//! are private; callers drive it through the operations below and read back a
//! [`Screen`] via [`Controller::screen`].
//!
//! Every lookup runs in three steps: prepare (enter `Loading`, build the
//! request), send, complete (apply the response). The synchronous operations
//! chain them; [`AsyncController`](crate::AsyncController) runs the send step
//! without holding the controller so the loading state stays observable.

use crate::camera::{CaptureSession, Facing, MediaDevices};
use crate::client::PriceLookup;
use crate::config;
use crate::error::Result;
use crate::image;
use crate::models::{ScanRequest, ScanResponse, ScanStatus};
use crate::render::{self, Screen, UiState};
use log::{debug, error, info, warn};
use std::path::Path;

/// Which endpoint a response came from; they differ only in how a
/// non-success shape is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupKind {
    Image,
    Name,
}

// ---------------------------------------------------------------------------
// PendingLookup
// ---------------------------------------------------------------------------

/// A request built by a prepare step and not yet sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLookup {
    kind: LookupKind,
    request: ScanRequest,
}

impl PendingLookup {
    fn image(image_data: &str) -> Self {
        Self {
            kind: LookupKind::Image,
            request: ScanRequest::image(image_data),
        }
    }

    fn name(item_name: &str) -> Self {
        Self {
            kind: LookupKind::Name,
            request: ScanRequest::name(item_name),
        }
    }

    /// Send the request through `lookup`: images go to `/scan`, names to
    /// `/search`.
    pub fn send<L: PriceLookup + ?Sized>(&self, lookup: &mut L) -> Result<ScanResponse> {
        match (&self.kind, &self.request) {
            (LookupKind::Name, ScanRequest::Name { item_name }) => lookup.search(item_name),
            _ => lookup.scan(&self.request),
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct Controller<M: MediaDevices, L: PriceLookup> {
    media: M,
    lookup: L,
    session: CaptureSession<M::Stream>,
    state: UiState,
    preview: Option<String>,
    manual_entry: bool,
}

impl<M: MediaDevices, L: PriceLookup> Controller<M, L> {
    pub fn new(media: M, lookup: L) -> Self {
        Self {
            media,
            lookup,
            session: CaptureSession::new(),
            state: UiState::Idle,
            preview: None,
            manual_entry: false,
        }
    }

    // -- Accessors ---------------------------------------------------------

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Data-URL of the image last captured or selected.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn is_manual_entry_open(&self) -> bool {
        self.manual_entry || matches!(self.state, UiState::Error { manual_entry: true, .. })
    }

    pub fn has_active_stream(&self) -> bool {
        self.session.is_active()
    }

    /// Render the current state.
    pub fn screen(&self) -> Screen {
        render::render(&self.state, self.preview.as_deref(), self.manual_entry)
    }

    /// Single point of state change. Leaving camera mode always releases
    /// the stream.
    fn set_state(&mut self, state: UiState) {
        if state != UiState::CameraActive {
            self.session.release();
        }
        self.state = state;
    }

    // -- Camera ------------------------------------------------------------

    /// Request the rear camera and show the live stream.
    pub fn start_camera(&mut self) {
        self.session.release();
        match self.media.get_user_media(Facing::Environment) {
            Ok(stream) => {
                self.session.attach(stream);
                self.preview = None;
                self.set_state(UiState::CameraActive);
                info!("Camera started");
            }
            Err(e) => {
                warn!("Camera error: {}", e);
                self.set_state(UiState::error(config::CAMERA_DENIED_MESSAGE));
            }
        }
    }

    /// Grab the current frame, release the camera and look the image up.
    pub fn capture_photo(&mut self) {
        if let Some(pending) = self.prepare_capture() {
            self.dispatch(pending);
        }
    }

    /// Snapshot and release the camera, then enter `Loading`.
    ///
    /// The stream is released whether or not the snapshot succeeded.
    pub fn prepare_capture(&mut self) -> Option<PendingLookup> {
        let snapshot = self.session.snapshot(config::JPEG_QUALITY);
        self.session.release();

        let data_url = match snapshot {
            Some(Ok(snapshot)) => {
                debug!(
                    "Captured {}x{} frame ({} bytes)",
                    snapshot.width,
                    snapshot.height,
                    snapshot.bytes.len()
                );
                image::snapshot_data_url(&snapshot)
            }
            Some(Err(e)) => {
                warn!("Snapshot failed: {}", e);
                self.set_state(UiState::error(config::CAPTURE_FAILED_MESSAGE));
                return None;
            }
            None => {
                warn!("Capture requested without an active camera stream");
                self.set_state(UiState::error(config::CAPTURE_FAILED_MESSAGE));
                return None;
            }
        };

        self.show_preview(data_url.clone());
        Some(self.prepare_image(&data_url))
    }

    /// Discard the preview and start the camera again.
    pub fn retake(&mut self) {
        self.preview = None;
        self.set_state(UiState::Idle);
        self.start_camera();
    }

    /// Read a local image and look it up. `None` (no file chosen) is ignored.
    pub fn select_file(&mut self, path: Option<&Path>) {
        if let Some(pending) = self.prepare_file(path) {
            self.dispatch(pending);
        }
    }

    pub fn prepare_file(&mut self, path: Option<&Path>) -> Option<PendingLookup> {
        let Some(path) = path else {
            debug!("No file selected");
            return None;
        };

        match image::read_file_data_url(path) {
            Ok(data_url) => {
                self.show_preview(data_url.clone());
                Some(self.prepare_image(&data_url))
            }
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                self.set_state(UiState::error(config::FILE_READ_MESSAGE));
                None
            }
        }
    }

    fn show_preview(&mut self, data_url: String) {
        self.preview = Some(data_url);
        self.set_state(UiState::Preview);
    }

    // -- Manual entry ------------------------------------------------------

    pub fn toggle_manual_entry(&mut self) {
        self.manual_entry = !self.manual_entry;
    }

    /// Hide the current error message. An entry panel the error opened stays
    /// open.
    pub fn dismiss_error(&mut self) {
        if let UiState::Error { manual_entry, .. } = self.state {
            self.manual_entry |= manual_entry;
            self.set_state(UiState::Idle);
        }
    }

    // -- Lookups -----------------------------------------------------------

    /// Send an image to the scan endpoint and render the outcome.
    pub fn lookup_by_image(&mut self, image_data: &str) {
        let pending = self.prepare_image(image_data);
        self.dispatch(pending);
    }

    pub fn prepare_image(&mut self, image_data: &str) -> PendingLookup {
        self.set_state(UiState::Loading);
        PendingLookup::image(image_data)
    }

    /// Search by item name. Blank input is rejected without a request.
    pub fn lookup_by_name(&mut self, item_name: &str) {
        if let Some(pending) = self.prepare_name(item_name) {
            self.dispatch(pending);
        }
    }

    pub fn prepare_name(&mut self, item_name: &str) -> Option<PendingLookup> {
        let item_name = item_name.trim();
        if item_name.is_empty() {
            self.set_state(UiState::error(config::EMPTY_NAME_MESSAGE));
            return None;
        }
        self.set_state(UiState::Loading);
        Some(PendingLookup::name(item_name))
    }

    fn dispatch(&mut self, pending: PendingLookup) {
        let result = pending.send(&mut self.lookup);
        self.complete(pending, result);
    }

    /// Apply the outcome of a sent lookup.
    pub fn complete(&mut self, pending: PendingLookup, result: Result<ScanResponse>) {
        let state = match result {
            Ok(resp) => outcome(resp, pending.kind),
            Err(e) => {
                error!("Lookup request failed: {}", e);
                UiState::error(config::CONNECTIVITY_MESSAGE)
            }
        };
        if let UiState::Results(report) = &state {
            info!("Lookup succeeded:\n{}", render::results_text(report));
        }
        self.set_state(state);
    }

    // -- Teardown ----------------------------------------------------------

    /// Release the camera. Also happens on drop.
    pub fn teardown(&mut self) {
        self.session.release();
    }
}

/// Map a decoded response to the next state.
fn outcome(mut resp: ScanResponse, kind: LookupKind) -> UiState {
    if let Some(message) = resp.error.take().filter(|e| !e.is_empty()) {
        return UiState::error(message);
    }
    let status = resp.status;
    if let Some(report) = resp.report() {
        return UiState::Results(report);
    }
    match kind {
        LookupKind::Image => match status {
            Some(ScanStatus::RecognitionFailed) => UiState::error_with_manual_entry(
                resp.message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| config::RECOGNITION_FAILED_MESSAGE.to_string()),
            ),
            _ => UiState::error_with_manual_entry(config::RECOGNITION_FAILED_MESSAGE),
        },
        LookupKind::Name => UiState::error(config::NO_PRICES_MESSAGE),
    }
}
