use crate::core::{Axis, domain_to_pixel, visible_index_range};
use crate::render::{
    CanvasLayerKind, Color, GradientId, LinePrimitive, LinearGradient, RectFill, RectPrimitive,
    RenderScene,
};

use super::layout::PlotRegion;
use super::render_style::RenderStyle;
use super::scope_scene_builder::SceneInputs;

/// Clips the plot-local interval `[x0, x1)` to `[0, width]`.
fn clip_span(x0: f64, x1: f64, width: f64) -> Option<(f64, f64)> {
    let left = x0.max(0.0);
    let right = x1.min(width);
    (right > left).then_some((left, right))
}

fn bar_gradient(style: RenderStyle, region: PlotRegion) -> LinearGradient {
    LinearGradient::vertical(region.top, region.bottom())
        .with_stop(0.0, style.bar_gradient_top)
        .with_stop(0.5, style.bar_gradient_mid)
        .with_stop(1.0, style.bar_gradient_bottom)
}

fn analysis_bar_color(inputs: &SceneInputs<'_>, bin: usize, value: f64) -> Color {
    let style = inputs.style;
    if inputs.frame.is_analysis_bin(bin) {
        return style.analysis_bin_color;
    }
    match inputs.frame.active_threshold() {
        Some(threshold) if value >= threshold => style.above_threshold_color,
        _ => style.neutral_bar_color,
    }
}

pub(super) fn push_spectrum_bars(
    scene: &mut RenderScene,
    inputs: &SceneInputs<'_>,
    region: PlotRegion,
) {
    let spectrum = &inputs.frame.spectrum;
    if spectrum.is_empty() {
        return;
    }

    let layout = inputs.layout;
    let style = inputs.style;
    let viewport = inputs.viewport(Axis::Frequency);
    let bar_width = viewport.scale() * style.bar_width_ratio;
    let mut gradient: Option<GradientId> = None;

    for bin in visible_index_range(viewport, layout.plot_width, spectrum.len()) {
        let x0 = domain_to_pixel(bin as f64, viewport);
        let Some((left, right)) = clip_span(x0, x0 + bar_width, layout.plot_width) else {
            continue;
        };
        let value = spectrum[bin];
        let y = region.value_to_y(value, style.full_scale);

        let fill = if inputs.analysis_active {
            RectFill::Solid(analysis_bar_color(inputs, bin, value))
        } else {
            let id = *gradient.get_or_insert_with(|| scene.add_gradient(bar_gradient(style, region)));
            RectFill::Gradient(id)
        };

        let mut rect = RectPrimitive::filled(
            layout.surface_x(left),
            y,
            right - left,
            region.bottom() - y,
            fill,
        );
        if inputs.analysis_active && inputs.selection.is_some_and(|sel| sel.contains(bin)) {
            rect = rect.with_border(style.selection_outline_width, style.selection_outline_color);
        }
        scene.push_rect(CanvasLayerKind::SpectrumBars, rect);
    }
}

/// Translucent overlay over the backend-declared highlight bins.
pub(super) fn push_highlight(scene: &mut RenderScene, inputs: &SceneInputs<'_>, region: PlotRegion) {
    let Some(range) = inputs.frame.active_highlight_range() else {
        return;
    };
    let len = inputs.frame.spectrum.len();
    let end = range.end.min(len);
    if end <= range.start {
        return;
    }

    let layout = inputs.layout;
    let viewport = inputs.viewport(Axis::Frequency);
    let Some((left, right)) = clip_span(
        domain_to_pixel(range.start as f64, viewport),
        domain_to_pixel(end as f64, viewport),
        layout.plot_width,
    ) else {
        return;
    };

    scene.push_rect(
        CanvasLayerKind::Highlight,
        RectPrimitive::filled(
            layout.surface_x(left),
            region.top,
            right - left,
            region.height,
            RectFill::Solid(inputs.style.highlight_fill_color),
        ),
    );
}

pub(super) fn push_threshold_line(
    scene: &mut RenderScene,
    inputs: &SceneInputs<'_>,
    region: PlotRegion,
) {
    let Some(threshold) = inputs.frame.active_threshold() else {
        return;
    };
    let layout = inputs.layout;
    let style = inputs.style;
    let y = region.value_to_y(threshold, style.full_scale);
    scene.push_line(
        CanvasLayerKind::Threshold,
        LinePrimitive::new(
            layout.plot_left,
            y,
            layout.plot_left + layout.plot_width,
            y,
            style.threshold_line_width,
            style.threshold_line_color,
        ),
    );
}
