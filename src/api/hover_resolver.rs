use crate::core::{Axis, pixel_to_index};
use crate::interaction::{Tooltip, TooltipEntry};
use crate::render::Renderer;

use super::ScopeEngine;

impl<R: Renderer> ScopeEngine<R> {
    /// Tooltip for the surface point `(x, y)`, or `None` when the point is
    /// not over a drawn bar (frequency) or under the trace (time).
    pub(super) fn resolve_tooltip(&self, x: f64, y: f64) -> Option<Tooltip> {
        let layout = self.layout;
        let plot_x = layout.plot_x(x);
        if !layout.contains_plot_x(plot_x) {
            return None;
        }

        let axis = layout.axis_at(y);
        let region = layout.region(axis)?;
        let values = match axis {
            Axis::Time => &self.frame.samples,
            Axis::Frequency => &self.frame.spectrum,
        };
        let index = pixel_to_index(plot_x, self.viewport(axis), values.len())?;
        let value = values[index];
        let top = region.value_to_y(value, self.style.full_scale);
        if y < top || y > region.bottom() {
            return None;
        }

        let entries = match self.interaction.selection() {
            Some(selection)
                if axis == Axis::Frequency
                    && self.interaction.analysis().active
                    && selection.contains(index) =>
            {
                selection
                    .bins
                    .iter()
                    .filter_map(|&bin| {
                        values
                            .get(bin)
                            .map(|&value| TooltipEntry { index: bin, value })
                    })
                    .collect()
            }
            _ => vec![TooltipEntry { index, value }],
        };

        Some(Tooltip {
            axis,
            x,
            y,
            entries,
        })
    }
}
