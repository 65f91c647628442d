use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{AxisViewport, Frame};
use crate::error::ScopeResult;
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::layout::PlotLayout;
use super::{RenderStyle, ScopeEngine, ScopeEngineConfig, ViewportStore};

impl<R: Renderer> ScopeEngine<R> {
    /// Creates an engine with an empty frame and identity viewports.
    pub fn new(renderer: R, config: ScopeEngineConfig) -> ScopeResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            renderer,
            config,
            style: RenderStyle::default(),
            layout: PlotLayout::compute(config.surface, config.show_time_axis),
            time_viewport: AxisViewport::default(),
            frequency_viewport: AxisViewport::default(),
            interaction: InteractionState::default(),
            frame: Arc::new(Frame::default()),
            feed: None,
            viewport_store: None,
            redraw_pending: true,
            render_count: 0,
        })
    }

    /// Binds `store` and restores the viewports it holds, if any.
    ///
    /// Stored values that no longer satisfy the viewport invariants are
    /// ignored and the defaults kept.
    #[must_use]
    pub fn with_viewport_store(mut self, store: ViewportStore) -> Self {
        if let Some(stored) = store.load() {
            let restored = AxisViewport::new(stored.time.scale, stored.time.offset).and_then(
                |time| {
                    AxisViewport::new(stored.frequency.scale, stored.frequency.offset)
                        .map(|frequency| (time, frequency))
                },
            );
            match restored {
                Ok((time, frequency)) => {
                    self.time_viewport = time;
                    self.frequency_viewport = frequency;
                    debug!(
                        time_scale = time.scale(),
                        frequency_scale = frequency.scale(),
                        "restored stored viewports"
                    );
                }
                Err(err) => warn!(error = %err, "ignoring invalid stored viewports"),
            }
        }
        self.viewport_store = Some(store);
        self.invalidate();
        self
    }
}
