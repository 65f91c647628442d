use crate::error::{ScopeError, ScopeResult};
use crate::render::Color;

/// Style contract for scope scenes and analysis detail scenes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub background_color: Color,
    pub grid_line_color: Color,
    pub plot_border_color: Color,
    pub trace_color: Color,
    /// Top, middle and bottom stops of the shared bar gradient.
    pub bar_gradient_top: Color,
    pub bar_gradient_mid: Color,
    pub bar_gradient_bottom: Color,
    /// Bars listed in the frame's analysis bins.
    pub analysis_bin_color: Color,
    /// Bars at or above threshold while analysing.
    pub above_threshold_color: Color,
    /// Remaining bars while analysing.
    pub neutral_bar_color: Color,
    pub selection_outline_color: Color,
    pub highlight_fill_color: Color,
    pub threshold_line_color: Color,
    pub axis_label_color: Color,
    pub detail_bar_color: Color,
    pub detail_threshold_line_color: Color,
    /// Value that maps to the full height of a plot region.
    pub full_scale: f64,
    /// Bar width as a fraction of the per-bin pixel span.
    pub bar_width_ratio: f64,
    pub grid_line_width: f64,
    pub trace_line_width: f64,
    pub threshold_line_width: f64,
    pub selection_outline_width: f64,
    pub axis_label_font_size_px: f64,
    /// Horizontal divisions drawn across each plot region.
    pub grid_horizontal_divisions: u32,
    /// Value labels drawn along the left margin of each region.
    pub value_label_divisions: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgb(0.0, 0.0, 0.0),
            grid_line_color: Color::rgb8(0x33, 0x33, 0x33),
            plot_border_color: Color::rgb8(0x88, 0x88, 0x88),
            trace_color: Color::rgb8(0x4e, 0x79, 0xa7),
            bar_gradient_top: Color::rgb8(0xff, 0x4d, 0x4d),
            bar_gradient_mid: Color::rgb8(0xf2, 0x8e, 0x2b),
            bar_gradient_bottom: Color::rgb8(0x1f, 0x77, 0xb4),
            analysis_bin_color: Color::rgb8(0x8b, 0xc3, 0x4a),
            above_threshold_color: Color::rgb8(0xff, 0xeb, 0x3b),
            neutral_bar_color: Color::rgb8(0x3d, 0x3d, 0x3d),
            selection_outline_color: Color::rgb(1.0, 1.0, 1.0),
            highlight_fill_color: Color::rgba(0.0, 1.0, 0.0, 0.1),
            threshold_line_color: Color::rgb8(0xff, 0xeb, 0x3b),
            axis_label_color: Color::rgb(1.0, 1.0, 1.0),
            detail_bar_color: Color::rgb(1.0, 1.0, 1.0),
            detail_threshold_line_color: Color::rgb(1.0, 0.0, 0.0),
            full_scale: 256.0,
            bar_width_ratio: 0.9,
            grid_line_width: 1.0,
            trace_line_width: 1.0,
            threshold_line_width: 1.0,
            selection_outline_width: 1.0,
            axis_label_font_size_px: 12.0,
            grid_horizontal_divisions: 5,
            value_label_divisions: 4,
        }
    }
}

pub(super) fn validate_render_style(style: RenderStyle) -> ScopeResult<RenderStyle> {
    for color in [
        style.background_color,
        style.grid_line_color,
        style.plot_border_color,
        style.trace_color,
        style.bar_gradient_top,
        style.bar_gradient_mid,
        style.bar_gradient_bottom,
        style.analysis_bin_color,
        style.above_threshold_color,
        style.neutral_bar_color,
        style.selection_outline_color,
        style.highlight_fill_color,
        style.threshold_line_color,
        style.axis_label_color,
        style.detail_bar_color,
        style.detail_threshold_line_color,
    ] {
        color.validate()?;
    }

    if !style.full_scale.is_finite() || style.full_scale <= 0.0 {
        return Err(ScopeError::InvalidData(
            "render style full scale must be finite and > 0".to_owned(),
        ));
    }
    if !style.bar_width_ratio.is_finite()
        || style.bar_width_ratio <= 0.0
        || style.bar_width_ratio > 1.0
    {
        return Err(ScopeError::InvalidData(
            "render style bar width ratio must be in (0, 1]".to_owned(),
        ));
    }
    for (name, width) in [
        ("grid line width", style.grid_line_width),
        ("trace line width", style.trace_line_width),
        ("threshold line width", style.threshold_line_width),
        ("selection outline width", style.selection_outline_width),
        ("axis label font size", style.axis_label_font_size_px),
    ] {
        if !width.is_finite() || width <= 0.0 {
            return Err(ScopeError::InvalidData(format!(
                "render style {name} must be finite and > 0"
            )));
        }
    }
    if style.grid_horizontal_divisions == 0 || style.value_label_divisions == 0 {
        return Err(ScopeError::InvalidData(
            "render style divisions must be > 0".to_owned(),
        ));
    }

    Ok(style)
}
