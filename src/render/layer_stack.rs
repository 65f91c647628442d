use serde::{Deserialize, Serialize};

/// Scene layers, listed in the order backends paint them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    TimeGrid,
    Trace,
    SpectrumGrid,
    SpectrumBars,
    Highlight,
    Threshold,
    AxisLabels,
}

/// Ordered layer list backing one scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStack {
    pub layers: Vec<CanvasLayerKind>,
}

impl LayerStack {
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            layers: vec![
                CanvasLayerKind::Background,
                CanvasLayerKind::TimeGrid,
                CanvasLayerKind::Trace,
                CanvasLayerKind::SpectrumGrid,
                CanvasLayerKind::SpectrumBars,
                CanvasLayerKind::Highlight,
                CanvasLayerKind::Threshold,
                CanvasLayerKind::AxisLabels,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasLayerKind, LayerStack};

    #[test]
    fn overlays_paint_after_bars_and_labels_last() {
        let stack = LayerStack::canonical();
        let position = |kind| {
            stack
                .layers
                .iter()
                .position(|layer| *layer == kind)
                .expect("layer present")
        };
        assert_eq!(position(CanvasLayerKind::Background), 0);
        assert!(position(CanvasLayerKind::TimeGrid) < position(CanvasLayerKind::Trace));
        assert!(position(CanvasLayerKind::SpectrumBars) < position(CanvasLayerKind::Highlight));
        assert!(position(CanvasLayerKind::Highlight) < position(CanvasLayerKind::Threshold));
        assert_eq!(
            position(CanvasLayerKind::AxisLabels),
            stack.layers.len() - 1
        );
    }
}
