use tracing::{debug, trace};

use crate::core::{Axis, AxisViewport, SurfaceSize, ViewportSnapshot};
use crate::error::{ScopeError, ScopeResult};
use crate::render::Renderer;

use super::ScopeEngine;
use super::layout::PlotLayout;

impl<R: Renderer> ScopeEngine<R> {
    #[must_use]
    pub fn viewport(&self, axis: Axis) -> AxisViewport {
        match axis {
            Axis::Time => self.time_viewport,
            Axis::Frequency => self.frequency_viewport,
        }
    }

    /// Fits the domain interval `[start, end)` of `axis` into the plot.
    pub fn zoom_axis_to_range(&mut self, axis: Axis, start: f64, end: f64) -> ScopeResult<()> {
        let len = self.domain_len(axis) as f64;
        let width = self.layout.plot_width;
        let mut next = self.viewport(axis);
        next.zoom_to_range(start, end, len, width)?;
        self.commit_viewport(axis, next);
        Ok(())
    }

    /// Pans `axis` by a pixel displacement, as a drag would.
    pub fn pan_axis(&mut self, axis: Axis, delta_px: f64) -> ScopeResult<()> {
        let len = self.domain_len(axis) as f64;
        let width = self.layout.plot_width;
        let mut next = self.viewport(axis);
        next.pan(delta_px, len, width)?;
        self.commit_viewport(axis, next);
        Ok(())
    }

    /// Re-measures the surface and clamps both viewports to it.
    pub fn resize(&mut self, surface: SurfaceSize) -> ScopeResult<()> {
        if !surface.is_valid() {
            return Err(ScopeError::InvalidSurface {
                width: surface.width,
                height: surface.height,
            });
        }
        let layout = PlotLayout::compute(surface, self.config.show_time_axis);
        let mut time = self.time_viewport;
        let mut frequency = self.frequency_viewport;
        time.clamp(self.domain_len(Axis::Time) as f64, layout.plot_width)?;
        frequency.clamp(self.domain_len(Axis::Frequency) as f64, layout.plot_width)?;

        self.config.surface = surface;
        self.layout = layout;
        self.time_viewport = time;
        self.frequency_viewport = frequency;
        debug!(
            width = surface.width,
            height = surface.height,
            "scope resized"
        );
        self.invalidate();
        Ok(())
    }

    pub fn set_show_time_axis(&mut self, show: bool) {
        if self.config.show_time_axis == show {
            return;
        }
        self.config.show_time_axis = show;
        self.layout = PlotLayout::compute(self.config.surface, show);
        self.invalidate();
    }

    /// Writes both viewports to the bound store. While analysing, the
    /// frequency viewport saved on entry is persisted instead of the
    /// zoomed-in one.
    pub fn persist_viewports(&self) -> bool {
        let Some(store) = self.viewport_store.as_ref() else {
            return false;
        };
        let frequency = self
            .interaction
            .analysis()
            .saved_viewport
            .filter(|_| self.interaction.analysis().active)
            .unwrap_or_else(|| self.frequency_viewport.snapshot());
        store.save(self.time_viewport.snapshot(), frequency);
        trace!("viewports persisted");
        true
    }

    pub(super) fn commit_viewport(&mut self, axis: Axis, next: AxisViewport) {
        let current = self.viewport_mut(axis);
        if *current == next {
            return;
        }
        *current = next;
        self.invalidate();
    }

    pub(super) fn restore_frequency_viewport(&mut self, snapshot: ViewportSnapshot) -> ScopeResult<()> {
        let mut next = self.frequency_viewport;
        next.restore(snapshot)?;
        self.frequency_viewport = next;
        Ok(())
    }
}
