//! Single-slot frame exchange between backend delivery and the display tick.
//!
//! The producer calls [`FrameChannel::push`] from whatever context the
//! backend notification arrives on. The render thread calls
//! [`FrameChannel::drain`] once per display tick. Only the newest pending
//! frame survives: a push over an undrained frame discards the older one.

use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, ReentrantMutex};
use tracing::trace;

use crate::core::Frame;

type Listener = Box<dyn Fn(&Arc<Frame>) + Send + Sync>;

struct ListenerEntry {
    id: u64,
    // Held for the duration of each delivery. Unsubscribing takes the same
    // lock, so it waits out an in-flight call on another thread; the
    // reentrant lock lets a listener unsubscribe itself mid-call.
    gate: ReentrantMutex<Cell<bool>>,
    listener: Listener,
}

struct ChannelInner {
    slot: Mutex<Option<Frame>>,
    listeners: Mutex<Vec<Arc<ListenerEntry>>>,
    next_id: AtomicU64,
}

/// Cloneable handle to one drop-old-keep-latest frame slot.
#[derive(Clone)]
pub struct FrameChannel {
    inner: Arc<ChannelInner>,
}

impl Default for FrameChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameChannel")
            .field("pending", &self.has_pending())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl FrameChannel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ChannelInner {
                slot: Mutex::new(None),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Stores `frame` as the pending frame, replacing any undrained one.
    ///
    /// Returns the sequence id of the frame that was discarded, if any.
    pub fn push(&self, frame: Frame) -> Option<u64> {
        let incoming = frame.sequence_id;
        let dropped = self.inner.slot.lock().replace(frame);
        let dropped_id = dropped.map(|stale| stale.sequence_id);
        if let Some(dropped_id) = dropped_id {
            trace!(dropped_id, incoming, "superseded undrained frame");
        }
        dropped_id
    }

    /// Registers a listener; delivery order follows registration order.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<Frame>) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let entry = Arc::new(ListenerEntry {
            id,
            gate: ReentrantMutex::new(Cell::new(true)),
            listener: Box::new(listener),
        });
        self.inner.listeners.lock().push(entry);
        trace!(id, "frame listener subscribed");
        Subscription {
            channel: Arc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Delivers the pending frame, if any, to every current listener and
    /// clears the slot. Returns how many listeners received it.
    pub fn drain(&self) -> usize {
        let Some(frame) = self.inner.slot.lock().take() else {
            return 0;
        };
        let frame = Arc::new(frame);
        // Snapshot so listeners may (un)subscribe while being called.
        let listeners: Vec<Arc<ListenerEntry>> = self.inner.listeners.lock().clone();

        let mut delivered = 0;
        for entry in &listeners {
            let gate = entry.gate.lock();
            if !gate.get() {
                continue;
            }
            (entry.listener)(&frame);
            delivered += 1;
        }
        trace!(sequence_id = frame.sequence_id, delivered, "frame drained");
        delivered
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.inner.slot.lock().is_some()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }
}

impl ChannelInner {
    fn unsubscribe(&self, id: u64) {
        let entry = self
            .listeners
            .lock()
            .iter()
            .find(|entry| entry.id == id)
            .cloned();
        if let Some(entry) = entry {
            entry.gate.lock().set(false);
        }
        self.listeners.lock().retain(|entry| entry.id != id);
        trace!(id, "frame listener unsubscribed");
    }
}

/// Registration handle returned by [`FrameChannel::subscribe`].
///
/// Dropping the handle unsubscribes as well.
pub struct Subscription {
    channel: std::sync::Weak<ChannelInner>,
    id: Option<u64>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Subscription {
    /// Stops delivery to this listener.
    ///
    /// When called from another thread while the listener is running, this
    /// blocks until that call returns; no delivery starts afterwards.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.channel.strong_count() > 0
    }

    fn release(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(inner) = self.channel.upgrade() {
            inner.unsubscribe(id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
