use crate::core::{BinRange, SurfaceSize};
use crate::error::{ScopeError, ScopeResult};
use crate::render::{
    CanvasLayerKind, LinePrimitive, RectFill, RectPrimitive, RenderScene, TextHAlign,
    TextPrimitive, TextVAlign,
};

use super::render_style::{RenderStyle, validate_render_style};

const DETAIL_LEFT_MARGIN_PX: f64 = 30.0;
const DETAIL_TOP_MARGIN_PX: f64 = 20.0;
const DETAIL_BOTTOM_MARGIN_PX: f64 = 20.0;
const DETAIL_HEADROOM: f64 = 50.0;
const DETAIL_Y_LABEL_STEP: f64 = 10.0;
const DETAIL_LABEL_GAP_PX: f64 = 2.0;
const DETAIL_Y_LABEL_GAP_PX: f64 = 6.0;

/// Builds the standalone bar chart of `spectrum[range]` against `threshold`,
/// with a label for every bin and its value.
pub fn build_analysis_detail_scene(
    surface: SurfaceSize,
    spectrum: &[f64],
    range: BinRange,
    threshold: f64,
    style: RenderStyle,
) -> ScopeResult<RenderScene> {
    if !surface.is_valid() {
        return Err(ScopeError::InvalidSurface {
            width: surface.width,
            height: surface.height,
        });
    }
    if !threshold.is_finite() {
        return Err(ScopeError::InvalidData(
            "analysis threshold must be finite".to_owned(),
        ));
    }
    let style = validate_render_style(style)?;

    let mut scene = RenderScene::new(surface);
    scene.push_rect(
        CanvasLayerKind::Background,
        RectPrimitive::filled(
            0.0,
            0.0,
            f64::from(surface.width),
            f64::from(surface.height),
            RectFill::Solid(style.background_color),
        ),
    );

    let start = range.start.min(spectrum.len());
    let end = range.end.min(spectrum.len());
    if end <= start {
        return Ok(scene);
    }
    let slice = &spectrum[start..end];

    let draw_width = (f64::from(surface.width) - DETAIL_LEFT_MARGIN_PX).max(0.0);
    let draw_height = (f64::from(surface.height) - DETAIL_TOP_MARGIN_PX - DETAIL_BOTTOM_MARGIN_PX)
        .max(0.0);
    let baseline = DETAIL_TOP_MARGIN_PX + draw_height;
    let slice_max = slice
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    let max_value = threshold.max(slice_max) + DETAIL_HEADROOM;
    let span = draw_width / slice.len() as f64;

    let bar_height = |value: f64| -> f64 {
        if !value.is_finite() || max_value <= 0.0 {
            return 0.0;
        }
        draw_height * (value / max_value).clamp(0.0, 1.0)
    };

    for (i, value) in slice.iter().copied().enumerate() {
        let x = DETAIL_LEFT_MARGIN_PX + i as f64 * span;
        let height = bar_height(value);
        let color = if value >= threshold {
            style.above_threshold_color
        } else {
            style.detail_bar_color
        };
        scene.push_rect(
            CanvasLayerKind::SpectrumBars,
            RectPrimitive::filled(
                x,
                baseline - height,
                span * style.bar_width_ratio,
                height,
                RectFill::Solid(color),
            ),
        );

        let center = x + span / 2.0;
        scene.push_text(
            CanvasLayerKind::AxisLabels,
            TextPrimitive::new(
                (start + i).to_string(),
                center,
                baseline + DETAIL_LABEL_GAP_PX,
                style.axis_label_font_size_px,
                style.axis_label_color,
                TextHAlign::Center,
                TextVAlign::Top,
            ),
        );
        scene.push_text(
            CanvasLayerKind::AxisLabels,
            TextPrimitive::new(
                format!("{value:.0}"),
                center,
                baseline - height - DETAIL_LABEL_GAP_PX,
                style.axis_label_font_size_px,
                style.axis_label_color,
                TextHAlign::Center,
                TextVAlign::Bottom,
            ),
        );
    }

    if max_value > 0.0 {
        let y = baseline - draw_height * (threshold / max_value);
        scene.push_line(
            CanvasLayerKind::Threshold,
            LinePrimitive::new(
                DETAIL_LEFT_MARGIN_PX,
                y,
                DETAIL_LEFT_MARGIN_PX + draw_width,
                y,
                style.threshold_line_width,
                style.detail_threshold_line_color,
            ),
        );
    }

    let step = detail_value_label_step(max_value, draw_height, style.axis_label_font_size_px);
    let rounded_max = (max_value / step).ceil() * step;
    let tick_count = (rounded_max / step).ceil().max(1.0) as usize;
    for i in 0..=tick_count {
        let value = rounded_max - step * i as f64;
        scene.push_text(
            CanvasLayerKind::AxisLabels,
            TextPrimitive::new(
                format!("{value:.0}"),
                DETAIL_LEFT_MARGIN_PX - DETAIL_Y_LABEL_GAP_PX,
                DETAIL_TOP_MARGIN_PX + draw_height / tick_count as f64 * i as f64,
                style.axis_label_font_size_px,
                style.axis_label_color,
                TextHAlign::Right,
                TextVAlign::Middle,
            ),
        );
    }

    Ok(scene)
}

/// Multiple of ten between value labels, widened so that no more than one
/// label fits per font height of the plot.
fn detail_value_label_step(max_value: f64, draw_height: f64, font_size_px: f64) -> f64 {
    let max_labels = (draw_height / font_size_px).floor().max(1.0);
    if max_value / DETAIL_Y_LABEL_STEP <= max_labels {
        return DETAIL_Y_LABEL_STEP;
    }
    (max_value / max_labels / DETAIL_Y_LABEL_STEP).ceil() * DETAIL_Y_LABEL_STEP
}

#[cfg(test)]
mod tests {
    use super::build_analysis_detail_scene;
    use crate::api::render_style::RenderStyle;
    use crate::core::{BinRange, SurfaceSize};
    use crate::render::{CanvasLayerKind, RectFill, TextHAlign};

    #[test]
    fn bars_above_threshold_use_accent_and_each_bin_is_labelled() {
        let style = RenderStyle::default();
        let spectrum: Vec<f64> = (0..20).map(|i| f64::from(i) * 10.0).collect();
        let scene = build_analysis_detail_scene(
            SurfaceSize::new(430, 300),
            &spectrum,
            BinRange::new(5, 15),
            100.0,
            style,
        )
        .expect("detail scene");

        let bars = &scene.layer(CanvasLayerKind::SpectrumBars).expect("bars").rects;
        assert_eq!(bars.len(), 10);
        assert_eq!(bars[0].fill, Some(RectFill::Solid(style.detail_bar_color)));
        assert_eq!(bars[5].fill, Some(RectFill::Solid(style.above_threshold_color)));
        assert!((bars[1].x - 70.0).abs() <= 1e-9);

        let labels = &scene.layer(CanvasLayerKind::AxisLabels).expect("labels").texts;
        assert!(labels.iter().any(|text| text.text == "5"));
        assert!(labels.iter().any(|text| text.text == "14"));
        // max = 140 + 50 = 190 -> labels 190, 180, ... 0
        assert!(labels.iter().any(|text| text.text == "190"));
        assert_eq!(
            scene.layer(CanvasLayerKind::Threshold).expect("threshold").lines.len(),
            1
        );
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn range_past_spectrum_end_is_clipped_and_empty_range_is_background_only() {
        let spectrum = vec![1.0; 8];
        let scene = build_analysis_detail_scene(
            SurfaceSize::new(200, 100),
            &spectrum,
            BinRange::new(6, 40),
            0.0,
            RenderStyle::default(),
        )
        .expect("detail scene");
        assert_eq!(scene.layer(CanvasLayerKind::SpectrumBars).expect("bars").rects.len(), 2);

        let scene = build_analysis_detail_scene(
            SurfaceSize::new(200, 100),
            &spectrum,
            BinRange::new(10, 12),
            0.0,
            RenderStyle::default(),
        )
        .expect("detail scene");
        assert_eq!(scene.rect_count(), 1);
    }

    #[test]
    fn huge_threshold_keeps_value_labels_within_the_plot_height() {
        let style = RenderStyle::default();
        let scene = build_analysis_detail_scene(
            SurfaceSize::new(400, 200),
            &[1.0; 16],
            BinRange::new(0, 4),
            1e7,
            style,
        )
        .expect("detail scene");

        let value_labels = scene
            .layer(CanvasLayerKind::AxisLabels)
            .expect("labels")
            .texts
            .iter()
            .filter(|text| text.h_align == TextHAlign::Right)
            .count();
        // 160px of plot at 12px per label.
        assert!(value_labels >= 2);
        assert!(value_labels <= 14);
        assert!(scene.text_count() <= 4 * 2 + 14);
    }

    #[test]
    fn value_label_step_stays_ten_when_labels_fit() {
        assert_eq!(super::detail_value_label_step(190.0, 260.0, 12.0), 10.0);
        assert_eq!(super::detail_value_label_step(190.0, 200.0, 12.0), 20.0);
        let step = super::detail_value_label_step(1e300, 160.0, 12.0);
        assert!(step.is_finite());
        assert!(1e300 / step <= 13.5);
    }
}
