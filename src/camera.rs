//! Camera access behind a pair of traits, plus the session that owns a live
//! stream.
//!
//! A [`CaptureSession`] holds at most one stream and stops its tracks on
//! every exit: explicit release, reassignment, and drop.

use crate::error::Result;
use log::{debug, info};

/// Which camera to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Front camera.
    User,
    /// Rear camera.
    Environment,
}

/// A still image grabbed from a stream, already encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub mime: String,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// A live camera stream.
pub trait MediaStream {
    /// Encode the current frame as JPEG at the given quality (0.0 to 1.0).
    fn snapshot(&mut self, quality: f32) -> Result<Snapshot>;

    /// Stop every track of the stream.
    fn stop_tracks(&mut self);
}

/// Grants camera streams. Denial is reported as an error.
pub trait MediaDevices {
    type Stream: MediaStream;

    fn get_user_media(&mut self, facing: Facing) -> Result<Self::Stream>;
}

// ---------------------------------------------------------------------------
// CaptureSession
// ---------------------------------------------------------------------------

/// Owner of the (optional) active camera stream.
pub struct CaptureSession<S: MediaStream> {
    stream: Option<S>,
}

impl<S: MediaStream> CaptureSession<S> {
    pub fn new() -> Self {
        Self { stream: None }
    }

    /// Install a new stream, releasing the previous one first.
    pub fn attach(&mut self, stream: S) {
        self.release();
        debug!("Camera stream attached");
        self.stream = Some(stream);
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Snapshot the current frame, or `None` if no stream is attached.
    pub fn snapshot(&mut self, quality: f32) -> Option<Result<Snapshot>> {
        self.stream.as_mut().map(|s| s.snapshot(quality))
    }

    /// Stop all tracks and drop the stream. Safe to call when already released.
    pub fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_tracks();
            info!("Camera stream released");
        }
    }
}

impl<S: MediaStream> Default for CaptureSession<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MediaStream> Drop for CaptureSession<S> {
    fn drop(&mut self) {
        self.release();
    }
}
