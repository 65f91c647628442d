use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::ViewportSnapshot;

/// Both axis viewports as last persisted by a scope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredViewports {
    pub time: ViewportSnapshot,
    pub frequency: ViewportSnapshot,
}

/// Cloneable slot that carries viewports across scope recreation.
///
/// The composition that outlives individual scopes owns one store and hands
/// clones to each scope it mounts.
#[derive(Debug, Clone, Default)]
pub struct ViewportStore {
    inner: Arc<Mutex<Option<StoredViewports>>>,
}

impl ViewportStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, time: ViewportSnapshot, frequency: ViewportSnapshot) {
        *self.inner.lock() = Some(StoredViewports { time, frequency });
    }

    #[must_use]
    pub fn load(&self) -> Option<StoredViewports> {
        *self.inner.lock()
    }

    pub fn clear(&self) {
        *self.inner.lock() = None;
    }
}
