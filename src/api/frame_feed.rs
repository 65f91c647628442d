use std::sync::Arc;

use parking_lot::Mutex;

use crate::channel::{FrameChannel, Subscription};
use crate::core::Frame;

/// Engine-side subscriber: parks the newest delivered frame until the next
/// display tick picks it up.
#[derive(Debug)]
pub(super) struct FrameFeed {
    latest: Arc<Mutex<Option<Arc<Frame>>>>,
    subscription: Subscription,
}

impl FrameFeed {
    pub(super) fn attach(channel: &FrameChannel) -> Self {
        let latest: Arc<Mutex<Option<Arc<Frame>>>> = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&latest);
        let subscription = channel.subscribe(move |frame| {
            *sink.lock() = Some(Arc::clone(frame));
        });
        Self {
            latest,
            subscription,
        }
    }

    pub(super) fn take(&self) -> Option<Arc<Frame>> {
        self.latest.lock().take()
    }

    pub(super) fn detach(self) {
        self.subscription.unsubscribe();
    }
}
