use crate::core::{Axis, domain_to_pixel};
use crate::render::{CanvasLayerKind, RenderScene, TextHAlign, TextPrimitive, TextVAlign};

use super::axis_ticks::axis_tick_values;
use super::layout::PlotRegion;
use super::scope_scene_builder::SceneInputs;

const TICK_LABEL_GAP_PX: f64 = 5.0;
const VALUE_LABEL_GAP_PX: f64 = 10.0;

/// Tick labels under the region plus value labels along its left margin.
pub(super) fn push_axis_labels(
    scene: &mut RenderScene,
    inputs: &SceneInputs<'_>,
    axis: Axis,
    region: PlotRegion,
) {
    let layout = inputs.layout;
    let style = inputs.style;
    let viewport = inputs.viewport(axis);

    for tick in axis_tick_values(
        viewport,
        layout.plot_width,
        inputs.domain_len(axis),
        inputs.label_policy,
    ) {
        scene.push_text(
            CanvasLayerKind::AxisLabels,
            TextPrimitive::new(
                tick.to_string(),
                layout.surface_x(domain_to_pixel(tick as f64, viewport)),
                region.bottom() + TICK_LABEL_GAP_PX,
                style.axis_label_font_size_px,
                style.axis_label_color,
                TextHAlign::Center,
                TextVAlign::Top,
            ),
        );
    }

    let divisions = style.value_label_divisions;
    for step in 0..=divisions {
        let fraction = f64::from(step) / f64::from(divisions);
        let value = style.full_scale * (1.0 - fraction);
        scene.push_text(
            CanvasLayerKind::AxisLabels,
            TextPrimitive::new(
                format!("{value:.0}"),
                layout.plot_left - VALUE_LABEL_GAP_PX,
                region.top + region.height * fraction,
                style.axis_label_font_size_px,
                style.axis_label_color,
                TextHAlign::Right,
                TextVAlign::Middle,
            ),
        );
    }
}
