use std::sync::Arc;

use tracing::{debug, trace};

use crate::channel::FrameChannel;
use crate::core::Frame;
use crate::error::ScopeResult;
use crate::render::Renderer;

use super::ScopeEngine;
use super::frame_feed::FrameFeed;

impl<R: Renderer> ScopeEngine<R> {
    /// Replaces the current frame. Viewports are left as they are.
    pub fn set_frame(&mut self, frame: Frame) {
        self.set_frame_arc(Arc::new(frame));
    }

    pub fn set_frame_arc(&mut self, frame: Arc<Frame>) {
        debug!(
            sequence_id = frame.sequence_id,
            samples = frame.samples.len(),
            bins = frame.spectrum.len(),
            "ingest frame"
        );
        self.frame = frame;
        self.invalidate();
    }

    /// Subscribes to `channel`; frames it delivers are picked up by the
    /// next [`ScopeEngine::display_tick`]. Replaces any earlier channel.
    pub fn attach_channel(&mut self, channel: &FrameChannel) {
        self.detach_channel();
        self.feed = Some(FrameFeed::attach(channel));
        trace!("frame channel attached");
    }

    /// Stops frame delivery; frames already delivered but not yet ingested
    /// are discarded.
    pub fn detach_channel(&mut self) {
        if let Some(feed) = self.feed.take() {
            feed.detach();
            trace!("frame channel detached");
        }
    }

    #[must_use]
    pub fn has_channel(&self) -> bool {
        self.feed.is_some()
    }

    /// Moves the newest delivered frame, if any, into the engine.
    pub fn ingest_pending_frame(&mut self) -> bool {
        let Some(frame) = self.feed.as_ref().and_then(FrameFeed::take) else {
            return false;
        };
        self.set_frame_arc(frame);
        true
    }

    /// One display-refresh step: ingest the newest delivered frame, then
    /// render once if anything changed since the last draw.
    ///
    /// Returns whether a render happened.
    pub fn display_tick(&mut self) -> ScopeResult<bool> {
        self.ingest_pending_frame();
        if !self.redraw_pending {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }
}
