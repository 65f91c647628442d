use crate::core::{Axis, pixel_to_index};
use crate::render::{CanvasLayerKind, PolylinePrimitive, RenderScene};

use super::layout::PlotRegion;
use super::scope_scene_builder::SceneInputs;

/// Amplitude trace, one vertex per plot pixel column.
pub(super) fn push_trace(scene: &mut RenderScene, inputs: &SceneInputs<'_>, region: PlotRegion) {
    let samples = &inputs.frame.samples;
    if samples.is_empty() {
        return;
    }

    let layout = inputs.layout;
    let viewport = inputs.viewport(Axis::Time);
    let columns = layout.plot_width.floor() as usize;
    let full_scale = inputs.style.full_scale;

    let points: Vec<(f64, f64)> = (0..=columns)
        .filter_map(|column| {
            let px = column as f64;
            let index = pixel_to_index(px, viewport, samples.len())?;
            let y = region.value_to_y(samples[index], full_scale);
            Some((layout.surface_x(px), y))
        })
        .collect();

    if points.len() < 2 {
        return;
    }
    scene.push_polyline(
        CanvasLayerKind::Trace,
        PolylinePrimitive::new(
            points,
            inputs.style.trace_line_width,
            inputs.style.trace_color,
        ),
    );
}

#[cfg(test)]
mod tests {
    use crate::api::axis_ticks::AxisLabelPolicy;
    use crate::api::layout::PlotLayout;
    use crate::api::render_style::RenderStyle;
    use crate::api::scope_scene_builder::{SceneInputs, build_scope_scene};
    use crate::core::{AxisViewport, Frame, SurfaceSize};
    use crate::render::CanvasLayerKind;

    #[test]
    fn trace_stops_where_samples_run_out() {
        let frame = Frame::new(1, vec![128.0; 100], Vec::new());
        let inputs = SceneInputs {
            frame: &frame,
            layout: PlotLayout::compute(SurfaceSize::new(580, 460), true),
            time_viewport: AxisViewport::default(),
            frequency_viewport: AxisViewport::default(),
            analysis_active: false,
            selection: None,
            style: RenderStyle::default(),
            label_policy: AxisLabelPolicy::default(),
        };
        let scene = build_scope_scene(&inputs).expect("scene");
        let trace = scene.layer(CanvasLayerKind::Trace).expect("trace layer");
        assert_eq!(trace.polylines.len(), 1);
        assert_eq!(trace.polylines[0].points.len(), 100);
        assert_eq!(trace.polylines[0].points[0].0, 60.0);
    }
}
