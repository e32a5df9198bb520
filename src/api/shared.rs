use std::sync::{Arc, Mutex};

use crate::error::{ChartError, ChartResult};

use super::Viewport;

/// Cloneable handle for a viewport mutated from input callbacks and read by
/// the render loop.
///
/// Each access holds the lock for one closure call, so every mutator and
/// every frame sees a consistent viewport.
#[derive(Debug, Clone)]
pub struct SharedViewport {
    inner: Arc<Mutex<Viewport>>,
}

impl SharedViewport {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            inner: Arc::new(Mutex::new(viewport)),
        }
    }

    pub fn with_mut<T>(&self, f: impl FnOnce(&mut Viewport) -> T) -> ChartResult<T> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| ChartError::ViewportLockPoisoned)?;
        Ok(f(&mut guard))
    }

    pub fn with<T>(&self, f: impl FnOnce(&Viewport) -> T) -> ChartResult<T> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| ChartError::ViewportLockPoisoned)?;
        Ok(f(&guard))
    }

    /// Clones the current viewport state.
    pub fn snapshot_viewport(&self) -> ChartResult<Viewport> {
        self.with(Viewport::clone)
    }
}
