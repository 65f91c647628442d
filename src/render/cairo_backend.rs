use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{ScopeError, ScopeResult};
use crate::render::{
    Color, LinearGradient, RectFill, RectPrimitive, RenderScene, Renderer, TextHAlign, TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub polylines_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, scene: &RenderScene)
    -> ScopeResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ScopeResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ScopeError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, scene: &RenderScene) -> ScopeResult<()> {
        scene.validate()?;

        let gradients: Vec<cairo::LinearGradient> =
            scene.gradients.iter().map(build_gradient).collect();

        let mut stats = CairoRenderStats::default();

        for layer in &scene.layers {
            for rect in &layer.rects {
                draw_rect(context, *rect, &gradients)?;
                stats.rects_drawn += 1;
            }

            for polyline in &layer.polylines {
                let mut points = polyline.points.iter();
                if let Some((x, y)) = points.next() {
                    context.move_to(*x, *y);
                }
                for (x, y) in points {
                    context.line_to(*x, *y);
                }
                apply_color(context, polyline.color);
                context.set_line_width(polyline.stroke_width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
                stats.polylines_drawn += 1;
            }

            for line in &layer.lines {
                apply_color(context, line.color);
                context.set_line_width(line.stroke_width);
                context.move_to(line.x1, line.y1);
                context.line_to(line.x2, line.y2);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke line", err))?;
                stats.lines_drawn += 1;
            }

            for text in &layer.texts {
                let layout = pangocairo::functions::create_layout(context);
                let font_description =
                    FontDescription::from_string(&format!("Monospace {}px", text.font_size_px));
                layout.set_font_description(Some(&font_description));
                layout.set_text(&text.text);

                let (text_width, text_height) = layout.pixel_size();
                let x = match text.h_align {
                    TextHAlign::Left => text.x,
                    TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                    TextHAlign::Right => text.x - f64::from(text_width),
                };
                let y = match text.v_align {
                    TextVAlign::Top => text.y,
                    TextVAlign::Middle => text.y - f64::from(text_height) / 2.0,
                    TextVAlign::Bottom => text.y - f64::from(text_height),
                };

                apply_color(context, text.color);
                context.move_to(x, y);
                pangocairo::functions::show_layout(context, &layout);
                stats.texts_drawn += 1;
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, scene: &RenderScene) -> ScopeResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, scene)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        scene: &RenderScene,
    ) -> ScopeResult<()> {
        self.render_with_context(context, scene)
    }
}

fn build_gradient(gradient: &LinearGradient) -> cairo::LinearGradient {
    let pattern = cairo::LinearGradient::new(0.0, gradient.y_top, 0.0, gradient.y_bottom);
    for stop in &gradient.stops {
        pattern.add_color_stop_rgba(
            stop.position,
            stop.color.red,
            stop.color.green,
            stop.color.blue,
            stop.color.alpha,
        );
    }
    pattern
}

fn draw_rect(
    context: &Context,
    rect: RectPrimitive,
    gradients: &[cairo::LinearGradient],
) -> ScopeResult<()> {
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    match rect.fill {
        Some(RectFill::Solid(color)) => apply_color(context, color),
        Some(RectFill::Gradient(id)) => {
            let pattern = gradients.get(id.0).ok_or_else(|| {
                ScopeError::Backend(format!("gradient {} is not declared", id.0))
            })?;
            context
                .set_source(pattern)
                .map_err(|err| map_backend_error("failed to set gradient source", err))?;
        }
        None => {}
    }

    let has_border = rect.border_width > 0.0;
    match (rect.fill.is_some(), has_border) {
        (true, true) => {
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            stroke_border(context, rect)
        }
        (true, false) => context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err)),
        (false, true) => stroke_border(context, rect),
        (false, false) => {
            context.new_path();
            Ok(())
        }
    }
}

fn stroke_border(context: &Context, rect: RectPrimitive) -> ScopeResult<()> {
    apply_color(context, rect.border_color);
    context.set_line_width(rect.border_width);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ScopeError {
    ScopeError::Backend(format!("{prefix}: {err}"))
}
