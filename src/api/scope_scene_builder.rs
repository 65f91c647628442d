use crate::core::{Axis, AxisViewport, Frame};
use crate::error::ScopeResult;
use crate::interaction::Selection;
use crate::render::{CanvasLayerKind, RectFill, RectPrimitive, RenderScene};

use super::axis_label_scene_builder::push_axis_labels;
use super::axis_ticks::AxisLabelPolicy;
use super::grid_scene_builder::push_region_grid;
use super::layout::PlotLayout;
use super::render_style::RenderStyle;
use super::spectrum_scene_builder::{push_highlight, push_spectrum_bars, push_threshold_line};
use super::trace_scene_builder::push_trace;

/// Everything one draw depends on. Building a scene from the same inputs
/// always yields the same scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneInputs<'a> {
    pub frame: &'a Frame,
    pub layout: PlotLayout,
    pub time_viewport: AxisViewport,
    pub frequency_viewport: AxisViewport,
    pub analysis_active: bool,
    pub selection: Option<&'a Selection>,
    pub style: RenderStyle,
    pub label_policy: AxisLabelPolicy,
}

impl SceneInputs<'_> {
    #[must_use]
    pub fn viewport(&self, axis: Axis) -> AxisViewport {
        match axis {
            Axis::Time => self.time_viewport,
            Axis::Frequency => self.frequency_viewport,
        }
    }

    #[must_use]
    pub fn domain_len(&self, axis: Axis) -> usize {
        match axis {
            Axis::Time => self.frame.samples.len(),
            Axis::Frequency => self.frame.spectrum.len(),
        }
    }
}

/// Builds the full scope scene: background, time grid and trace, spectrum
/// grid and bars, highlight, threshold and axis labels.
pub fn build_scope_scene(inputs: &SceneInputs<'_>) -> ScopeResult<RenderScene> {
    let layout = inputs.layout;
    let mut scene = RenderScene::new(layout.surface);

    scene.push_rect(
        CanvasLayerKind::Background,
        RectPrimitive::filled(
            0.0,
            0.0,
            f64::from(layout.surface.width),
            f64::from(layout.surface.height),
            RectFill::Solid(inputs.style.background_color),
        ),
    );

    if layout.plot_width <= 0.0 {
        return Ok(scene);
    }

    if let Some(time_region) = layout.time_region {
        push_region_grid(&mut scene, inputs, Axis::Time, time_region);
        push_trace(&mut scene, inputs, time_region);
        push_axis_labels(&mut scene, inputs, Axis::Time, time_region);
    }

    let frequency_region = layout.frequency_region;
    push_region_grid(&mut scene, inputs, Axis::Frequency, frequency_region);
    push_spectrum_bars(&mut scene, inputs, frequency_region);
    if !inputs.analysis_active {
        push_highlight(&mut scene, inputs, frequency_region);
    } else {
        push_threshold_line(&mut scene, inputs, frequency_region);
    }
    push_axis_labels(&mut scene, inputs, Axis::Frequency, frequency_region);

    Ok(scene)
}
