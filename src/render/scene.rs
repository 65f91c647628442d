use crate::core::SurfaceSize;
use crate::error::{ScopeError, ScopeResult};

use super::{
    CanvasLayerKind, GradientId, LayerStack, LinePrimitive, LinearGradient, PolylinePrimitive,
    RectFill, RectPrimitive, TextPrimitive,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayer {
    pub kind: CanvasLayerKind,
    pub rects: Vec<RectPrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl SceneLayer {
    #[must_use]
    pub fn new(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            rects: Vec::new(),
            polylines: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
            && self.polylines.is_empty()
            && self.lines.is_empty()
            && self.texts.is_empty()
    }
}

/// Backend-agnostic, fully materialized draw pass.
///
/// Backends paint layers in order; inside a layer they paint rects, then
/// polylines, then lines, then texts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderScene {
    pub surface: SurfaceSize,
    pub gradients: Vec<LinearGradient>,
    pub layers: Vec<SceneLayer>,
}

impl RenderScene {
    #[must_use]
    pub fn new(surface: SurfaceSize) -> Self {
        Self::from_stack(surface, LayerStack::canonical())
    }

    #[must_use]
    pub fn from_stack(surface: SurfaceSize, stack: LayerStack) -> Self {
        Self {
            surface,
            gradients: Vec::new(),
            layers: stack.layers.into_iter().map(SceneLayer::new).collect(),
        }
    }

    /// Declares a gradient that any number of rects may reference.
    pub fn add_gradient(&mut self, gradient: LinearGradient) -> GradientId {
        self.gradients.push(gradient);
        GradientId(self.gradients.len() - 1)
    }

    #[must_use]
    pub fn gradient(&self, id: GradientId) -> Option<&LinearGradient> {
        self.gradients.get(id.0)
    }

    pub fn push_rect(&mut self, kind: CanvasLayerKind, rect: RectPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.rects.push(rect);
        }
    }

    pub fn push_polyline(&mut self, kind: CanvasLayerKind, polyline: PolylinePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.polylines.push(polyline);
        }
    }

    pub fn push_line(&mut self, kind: CanvasLayerKind, line: LinePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.lines.push(line);
        }
    }

    pub fn push_text(&mut self, kind: CanvasLayerKind, text: TextPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.texts.push(text);
        }
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&SceneLayer> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    fn layer_mut(&mut self, kind: CanvasLayerKind) -> Option<&mut SceneLayer> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.rects.len()).sum()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.lines.len()).sum()
    }

    #[must_use]
    pub fn polyline_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.polylines.len()).sum()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.texts.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(SceneLayer::is_empty)
    }

    pub fn validate(&self) -> ScopeResult<()> {
        if !self.surface.is_valid() {
            return Err(ScopeError::InvalidSurface {
                width: self.surface.width,
                height: self.surface.height,
            });
        }

        for gradient in &self.gradients {
            gradient.validate()?;
        }
        for layer in &self.layers {
            for rect in &layer.rects {
                rect.validate()?;
                if let Some(RectFill::Gradient(id)) = rect.fill {
                    if self.gradient(id).is_none() {
                        return Err(ScopeError::InvalidData(format!(
                            "rect references undeclared gradient {}",
                            id.0
                        )));
                    }
                }
            }
            for polyline in &layer.polylines {
                polyline.validate()?;
            }
            for line in &layer.lines {
                line.validate()?;
            }
            for text in &layer.texts {
                text.validate()?;
            }
        }

        Ok(())
    }
}
