mod layer_stack;
mod null_renderer;
mod primitives;
mod scene;

pub use layer_stack::{CanvasLayerKind, LayerStack};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, GradientId, GradientStop, LinePrimitive, LinearGradient, PolylinePrimitive, RectFill,
    RectPrimitive, TextHAlign, TextPrimitive, TextVAlign,
};
pub use scene::{RenderScene, SceneLayer};

use crate::error::ScopeResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderScene` so drawing code stays
/// isolated from frame data, viewports and interaction logic.
pub trait Renderer {
    fn render(&mut self, scene: &RenderScene) -> ScopeResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
