//! Process-wide render batcher.
//!
//! Sprite submission code deep in a scene walk often has no batcher to pass
//! around. This module holds one shared instance with an explicit
//! [`initialize`]/[`shutdown`] lifecycle; access is serialized by a mutex.
//!
//! ```ignore
//! strata_render::global::initialize(RenderBatcherDescriptor::default())?;
//!
//! strata_render::global::with_batcher(|batcher| batcher.add(&material, &quad))?;
//! strata_render::global::with_batcher(|batcher| {
//!     batcher.render(&device);
//!     batcher.clear();
//! })?;
//!
//! strata_render::global::shutdown();
//! ```

use parking_lot::{Mutex, const_mutex};

use crate::batcher::{RenderBatcher, RenderBatcherDescriptor};
use crate::error::BatchError;

static INSTANCE: Mutex<Option<RenderBatcher>> = const_mutex(None);

/// Create and initialize the shared batcher.
pub fn initialize(descriptor: RenderBatcherDescriptor) -> Result<(), BatchError> {
    let mut instance = INSTANCE.lock();
    if instance.is_some() {
        tracing::warn!("Render batcher initialize called twice");
        return Err(BatchError::AlreadyInitialized);
    }

    let mut batcher = RenderBatcher::with_descriptor(descriptor)?;
    batcher.initialize();
    *instance = Some(batcher);
    Ok(())
}

/// Release the shared batcher and everything it holds.
///
/// Safe to call when not initialized. [`initialize`] may be called again
/// afterwards, e.g. after the device was lost and recreated.
pub fn shutdown() {
    match INSTANCE.lock().take() {
        Some(mut batcher) => batcher.shutdown(),
        None => tracing::debug!("Render batcher shutdown without an instance"),
    }
}

pub fn is_initialized() -> bool {
    INSTANCE.lock().is_some()
}

/// Run `f` with exclusive access to the shared batcher.
///
/// Do not call back into this module from inside `f`; the lock is not reentrant.
pub fn with_batcher<R>(f: impl FnOnce(&mut RenderBatcher) -> R) -> Result<R, BatchError> {
    let mut instance = INSTANCE.lock();
    let batcher = instance.as_mut().ok_or(BatchError::NotInitialized)?;
    Ok(f(batcher))
}
