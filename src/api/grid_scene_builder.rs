use crate::core::{Axis, domain_to_pixel};
use crate::render::{CanvasLayerKind, LinePrimitive, RectPrimitive, RenderScene};

use super::axis_ticks::axis_tick_values;
use super::layout::PlotRegion;
use super::scope_scene_builder::SceneInputs;

fn grid_layer(axis: Axis) -> CanvasLayerKind {
    match axis {
        Axis::Time => CanvasLayerKind::TimeGrid,
        Axis::Frequency => CanvasLayerKind::SpectrumGrid,
    }
}

/// Horizontal divisions, vertical lines on the label ticks, and the region
/// border.
pub(super) fn push_region_grid(
    scene: &mut RenderScene,
    inputs: &SceneInputs<'_>,
    axis: Axis,
    region: PlotRegion,
) {
    let layout = inputs.layout;
    let style = inputs.style;
    let layer = grid_layer(axis);
    let left = layout.plot_left;
    let right = layout.plot_left + layout.plot_width;

    let divisions = style.grid_horizontal_divisions;
    for step in 0..=divisions {
        let y = region.top + region.height * f64::from(step) / f64::from(divisions);
        scene.push_line(
            layer,
            LinePrimitive::new(
                left,
                y,
                right,
                y,
                style.grid_line_width,
                style.grid_line_color,
            ),
        );
    }

    let viewport = inputs.viewport(axis);
    for tick in axis_tick_values(
        viewport,
        layout.plot_width,
        inputs.domain_len(axis),
        inputs.label_policy,
    ) {
        let x = layout.surface_x(domain_to_pixel(tick as f64, viewport));
        scene.push_line(
            layer,
            LinePrimitive::new(
                x,
                region.top,
                x,
                region.bottom(),
                style.grid_line_width,
                style.grid_line_color,
            ),
        );
    }

    scene.push_rect(
        layer,
        RectPrimitive::outlined(
            left,
            region.top,
            layout.plot_width,
            region.height,
            style.grid_line_width,
            style.plot_border_color,
        ),
    );
}
