use std::sync::Arc;

use tracing::trace;

use crate::core::{Axis, AxisViewport, Frame};
use crate::error::ScopeResult;
use crate::interaction::{InteractionMode, InteractionState, Selection, Tooltip};
use crate::render::{RenderScene, Renderer};

use super::frame_feed::FrameFeed;
use super::layout::PlotLayout;
use super::render_style::validate_render_style;
use super::scope_scene_builder::{SceneInputs, build_scope_scene};
use super::{RenderStyle, ScopeEngineConfig, ViewportStore};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `ScopeEngine` owns the current frame, both axis viewports and the
/// interaction state, and turns them into scenes for its renderer.
pub struct ScopeEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ScopeEngineConfig,
    pub(super) style: RenderStyle,
    pub(super) layout: PlotLayout,
    pub(super) time_viewport: AxisViewport,
    pub(super) frequency_viewport: AxisViewport,
    pub(super) interaction: InteractionState,
    pub(super) frame: Arc<Frame>,
    pub(super) feed: Option<FrameFeed>,
    pub(super) viewport_store: Option<ViewportStore>,
    pub(super) redraw_pending: bool,
    pub(super) render_count: u64,
}

impl<R: Renderer> ScopeEngine<R> {
    #[must_use]
    pub fn config(&self) -> ScopeEngineConfig {
        self.config
    }

    #[must_use]
    pub fn layout(&self) -> PlotLayout {
        self.layout
    }

    #[must_use]
    pub fn frame(&self) -> &Arc<Frame> {
        &self.frame
    }

    #[must_use]
    pub fn render_style(&self) -> RenderStyle {
        self.style
    }

    pub fn set_render_style(&mut self, style: RenderStyle) -> ScopeResult<()> {
        self.style = validate_render_style(style)?;
        self.invalidate();
        Ok(())
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.interaction.selection()
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.interaction.tooltip()
    }

    #[must_use]
    pub fn is_analysis_active(&self) -> bool {
        self.interaction.analysis().active
    }

    /// Number of successful renders since construction.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.redraw_pending
    }

    /// Marks the scope dirty; the next display tick renders once.
    pub fn invalidate(&mut self) {
        self.redraw_pending = true;
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Materializes the scene for the current frame, viewports and mode
    /// without touching the renderer.
    pub fn build_scene(&self) -> ScopeResult<RenderScene> {
        build_scope_scene(&SceneInputs {
            frame: &self.frame,
            layout: self.layout,
            time_viewport: self.time_viewport,
            frequency_viewport: self.frequency_viewport,
            analysis_active: self.interaction.analysis().active,
            selection: self.interaction.selection(),
            style: self.style,
            label_policy: self.config.label_policy(),
        })
    }

    /// Draws the current state. A failing backend leaves every piece of
    /// model state as it was.
    pub fn render(&mut self) -> ScopeResult<()> {
        let scene = self.build_scene()?;
        self.renderer.render(&scene)?;
        self.finish_render(&scene);
        Ok(())
    }

    /// Draws into an external cairo context, e.g. from a GTK draw callback.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ScopeResult<()>
    where
        R: CairoContextRenderer,
    {
        let scene = self.build_scene()?;
        self.renderer.render_on_cairo_context(context, &scene)?;
        self.finish_render(&scene);
        Ok(())
    }

    fn finish_render(&mut self, scene: &RenderScene) {
        self.redraw_pending = false;
        self.render_count += 1;
        trace!(
            sequence_id = self.frame.sequence_id,
            rects = scene.rect_count(),
            texts = scene.text_count(),
            "scope rendered"
        );
    }

    pub(super) fn viewport_mut(&mut self, axis: Axis) -> &mut AxisViewport {
        match axis {
            Axis::Time => &mut self.time_viewport,
            Axis::Frequency => &mut self.frequency_viewport,
        }
    }

    pub(super) fn domain_len(&self, axis: Axis) -> usize {
        match axis {
            Axis::Time => self.frame.samples.len(),
            Axis::Frequency => self.frame.spectrum.len(),
        }
    }
}
