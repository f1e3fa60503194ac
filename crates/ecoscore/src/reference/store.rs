use super::ReferenceSnapshot;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Publishes the active snapshot. Readers clone the `Arc` and work against
/// it without further locking; a reload swaps in a new value and leaves the
/// old one alive until its last reader drops it.
///
/// Values that must change together (tables plus whatever was derived from
/// them) belong in one `T` so a reader never observes half a swap.
#[derive(Debug)]
pub struct SnapshotStore<T = ReferenceSnapshot> {
    current: RwLock<Arc<T>>,
}

impl<T> SnapshotStore<T> {
    pub fn new(snapshot: T) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn current(&self) -> Arc<T> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publishes `snapshot` for future reads and returns the one it replaced.
    pub fn replace(&self, snapshot: T) -> Arc<T> {
        let next = Arc::new(snapshot);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        debug!(kind = std::any::type_name::<T>(), "snapshot replaced");
        std::mem::replace(&mut *guard, next)
    }
}
