use tracing::{trace, warn};

use crate::core::ZoomDirection;
use crate::error::ScopeResult;
use crate::interaction::ScopeKey;
use crate::render::Renderer;

use super::ScopeEngine;

/// Host pointer coordinates must be finite; anything else is dropped.
fn finite_point(event: &'static str, x: f64, y: f64) -> bool {
    if x.is_finite() && y.is_finite() {
        return true;
    }
    warn!(event, x, y, "ignoring pointer event with non-finite coordinates");
    false
}

impl<R: Renderer> ScopeEngine<R> {
    /// Starts a drag on the axis whose region contains `y`.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if !finite_point("pointer_down", x, y) {
            return;
        }
        let axis = self.layout.axis_at(y);
        self.interaction.on_pointer_move(x, y);
        self.interaction.on_pointer_down(axis, x, y);
        trace!(?axis, x, "drag started");
    }

    /// Pans the dragged axis, or refreshes the hover tooltip when no drag
    /// is active. Hover alone never schedules a redraw.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ScopeResult<()> {
        if !finite_point("pointer_move", x, y) {
            return Ok(());
        }
        self.interaction.on_pointer_move(x, y);

        if let Some((axis, dx)) = self.interaction.on_drag_move(x) {
            return self.pan_axis(axis, dx);
        }

        let tooltip = self.resolve_tooltip(x, y);
        self.interaction.set_tooltip(tooltip);
        Ok(())
    }

    pub fn pointer_up(&mut self) {
        self.interaction.on_pointer_up();
    }

    /// Clears the tooltip and ends any drag.
    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
    }

    /// Zooms the axis under the cursor one step around the cursor.
    ///
    /// Negative `delta_y` zooms in. Ignored while a drag is active.
    pub fn wheel(&mut self, delta_y: f64, x: f64, y: f64) -> ScopeResult<()> {
        if !finite_point("wheel", x, y) {
            return Ok(());
        }
        if self.interaction.is_dragging() {
            return Ok(());
        }
        let Some(direction) = ZoomDirection::from_wheel_delta(delta_y) else {
            return Ok(());
        };

        let axis = self.layout.axis_at(y);
        let len = self.domain_len(axis) as f64;
        let width = self.layout.plot_width;
        let anchor = self.layout.plot_x(x);
        let mut next = self.viewport(axis);
        next.zoom_at_point_with_step(direction, self.config.zoom_step, anchor, len, width)?;
        self.commit_viewport(axis, next);
        Ok(())
    }

    /// Handles a key press. Returns whether the key changed anything.
    pub fn key(&mut self, key: ScopeKey) -> ScopeResult<bool> {
        match key {
            ScopeKey::Escape if self.interaction.analysis().active => {
                self.exit_analysis_mode()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
