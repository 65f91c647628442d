use crate::error::ScopeResult;
use crate::render::{RenderScene, Renderer};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates scene content so tests catch invalid geometry without
/// a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_rect_count: usize,
    pub last_polyline_count: usize,
    pub last_line_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &RenderScene) -> ScopeResult<()> {
        scene.validate()?;
        self.render_count += 1;
        self.last_rect_count = scene.rect_count();
        self.last_polyline_count = scene.polyline_count();
        self.last_line_count = scene.line_count();
        self.last_text_count = scene.text_count();
        Ok(())
    }
}
