//! Async wrapper around [`Controller`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every controller operation on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while a
//! lookup request is outstanding. The controller is locked only to prepare a
//! lookup and to apply its outcome, never across the network call, so
//! [`AsyncController::screen`] shows the loading state mid-request.
//!
//! Only one operation runs at a time. An operation started while another is
//! still in flight is rejected with [`SnapPriceError::Busy`] and leaves the
//! controller untouched; nothing is queued or cancelled.
//!
//! # Example
//!
//! ```no_run
//! # use snapprice::{AsyncController, PriceClient};
//! # use snapprice::camera::MediaDevices;
//! # async fn example<M>(media: M) -> snapprice::Result<()>
//! # where M: MediaDevices + Send + 'static, M::Stream: Send + 'static {
//! let ctl = AsyncController::new(media, PriceClient::default());
//! let screen = ctl.lookup_by_name("desk lamp").await?;
//! println!("{:?}", screen.error_message);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::camera::MediaDevices;
use crate::client::PriceLookup;
use crate::controller::{Controller, PendingLookup};
use crate::error::{Result, SnapPriceError};
use crate::models::{ScanRequest, ScanResponse};
use crate::render::Screen;

// ---------------------------------------------------------------------------
// SharedLookup
// ---------------------------------------------------------------------------

/// A lookup backend shared between the controller and the blocking pool.
pub struct SharedLookup<L>(Arc<Mutex<L>>);

impl<L> Clone for SharedLookup<L> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<L: PriceLookup> SharedLookup<L> {
    fn lock(&self) -> Result<MutexGuard<'_, L>> {
        self.0
            .lock()
            .map_err(|_| SnapPriceError::Poisoned("lookup backend"))
    }
}

impl<L: PriceLookup> PriceLookup for SharedLookup<L> {
    fn scan(&mut self, request: &ScanRequest) -> Result<ScanResponse> {
        self.lock()?.scan(request)
    }

    fn search(&mut self, item_name: &str) -> Result<ScanResponse> {
        self.lock()?.search(item_name)
    }
}

// ---------------------------------------------------------------------------
// InFlight
// ---------------------------------------------------------------------------

/// Holds the in-flight flag for the lifetime of one operation.
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                log::debug!("Operation ignored: controller busy");
                SnapPriceError::Busy
            })?;
        Ok(Self(flag.clone()))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ---------------------------------------------------------------------------
// AsyncController
// ---------------------------------------------------------------------------

type Inner<M, L> = Arc<Mutex<Controller<M, SharedLookup<L>>>>;

fn lock<M: MediaDevices, L: PriceLookup>(
    inner: &Inner<M, L>,
) -> Result<MutexGuard<'_, Controller<M, SharedLookup<L>>>> {
    inner
        .lock()
        .map_err(|_| SnapPriceError::Poisoned("controller"))
}

/// Async wrapper around [`Controller`].
///
/// Each operation returns the [`Screen`] rendered right after it completes.
pub struct AsyncController<M: MediaDevices, L: PriceLookup> {
    inner: Inner<M, L>,
    lookup: SharedLookup<L>,
    in_flight: Arc<AtomicBool>,
}

impl<M: MediaDevices, L: PriceLookup> Clone for AsyncController<M, L> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            lookup: self.lookup.clone(),
            in_flight: self.in_flight.clone(),
        }
    }
}

impl<M, L> AsyncController<M, L>
where
    M: MediaDevices + Send + 'static,
    M::Stream: Send + 'static,
    L: PriceLookup + Send + 'static,
{
    pub fn new(media: M, lookup: L) -> Self {
        let lookup = SharedLookup(Arc::new(Mutex::new(lookup)));
        Self {
            inner: Arc::new(Mutex::new(Controller::new(media, lookup.clone()))),
            lookup,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Run a prepare step, send its request (if any) without holding the
    /// controller, then apply the outcome. Fails with
    /// [`SnapPriceError::Busy`] if another operation is in flight.
    pub async fn run<F>(&self, prepare: F) -> Result<Screen>
    where
        F: FnOnce(&mut Controller<M, SharedLookup<L>>) -> Option<PendingLookup> + Send + 'static,
    {
        let flight = InFlight::acquire(&self.in_flight)?;
        let ctl = self.inner.clone();
        let mut lookup = self.lookup.clone();
        tokio::task::spawn_blocking(move || -> Result<Screen> {
            let _flight = flight;
            let pending = prepare(&mut *lock(&ctl)?);
            if let Some(pending) = pending {
                let result = pending.send(&mut lookup);
                lock(&ctl)?.complete(pending, result);
            }
            let screen = lock(&ctl)?.screen();
            Ok(screen)
        })
        .await
        .map_err(|e| SnapPriceError::InvalidArgument(format!("Task join error: {e}")))?
    }

    pub async fn start_camera(&self) -> Result<Screen> {
        self.run(|c| {
            c.start_camera();
            None
        })
        .await
    }

    pub async fn capture_photo(&self) -> Result<Screen> {
        self.run(|c| c.prepare_capture()).await
    }

    pub async fn retake(&self) -> Result<Screen> {
        self.run(|c| {
            c.retake();
            None
        })
        .await
    }

    pub async fn select_file(&self, path: Option<PathBuf>) -> Result<Screen> {
        self.run(move |c| c.prepare_file(path.as_deref())).await
    }

    pub async fn lookup_by_image(&self, image_data: String) -> Result<Screen> {
        self.run(move |c| Some(c.prepare_image(&image_data))).await
    }

    pub async fn lookup_by_name(&self, item_name: String) -> Result<Screen> {
        self.run(move |c| c.prepare_name(&item_name)).await
    }

    pub async fn toggle_manual_entry(&self) -> Result<Screen> {
        self.run(|c| {
            c.toggle_manual_entry();
            None
        })
        .await
    }

    pub async fn dismiss_error(&self) -> Result<Screen> {
        self.run(|c| {
            c.dismiss_error();
            None
        })
        .await
    }

    /// Render the current state. Does not wait for an in-flight lookup.
    pub fn screen(&self) -> Result<Screen> {
        Ok(lock(&self.inner)?.screen())
    }

    /// Release the camera.
    pub fn teardown(&self) -> Result<()> {
        lock(&self.inner)?.teardown();
        Ok(())
    }
}
