use std::collections::BTreeSet;

use tracing::{debug, trace, warn};

use crate::core::{Axis, BinRange, SurfaceSize, pixel_to_index};
use crate::error::ScopeResult;
use crate::interaction::{InteractionMode, Selection};
use crate::render::{RenderScene, Renderer};

use super::ScopeEngine;
use super::analysis_detail_builder::build_analysis_detail_scene;

impl<R: Renderer> ScopeEngine<R> {
    /// Enters analysis mode when `(x, y)` hits a highlighted bin, or leaves
    /// it when already analysing. Returns whether the mode changed.
    pub fn double_click(&mut self, x: f64, y: f64) -> ScopeResult<bool> {
        if !x.is_finite() || !y.is_finite() {
            warn!(x, y, "ignoring double click with non-finite coordinates");
            return Ok(false);
        }
        // The second press of a double click may already have started a drag.
        if self.interaction.cancel_stationary_drag() {
            trace!("dropped stationary press for double click");
        }
        if self.interaction.analysis().active {
            self.exit_analysis_mode()?;
            return Ok(true);
        }
        if self.interaction.mode() != InteractionMode::Idle {
            return Ok(false);
        }

        let Some(bin) = self.frequency_bin_at(x, y) else {
            return Ok(false);
        };
        let Some(range) = self.frame.active_highlight_range() else {
            return Ok(false);
        };
        if !range.contains(bin) {
            return Ok(false);
        }

        let len = self.frame.spectrum.len();
        let saved = self.frequency_viewport.snapshot();
        let mut next = self.frequency_viewport;
        next.zoom_to_range(
            range.start as f64,
            range.end.min(len) as f64,
            len as f64,
            self.layout.plot_width,
        )?;

        self.frequency_viewport = next;
        self.interaction.enter_analysis(saved);
        debug!(
            bin,
            start = range.start,
            end = range.end,
            "entered analysis mode"
        );
        self.invalidate();
        Ok(true)
    }

    /// Restores the frequency viewport saved on entry and drops the
    /// selection. No-op outside analysis mode.
    pub fn exit_analysis_mode(&mut self) -> ScopeResult<()> {
        let analysis = self.interaction.analysis();
        if !analysis.active {
            return Ok(());
        }
        if let Some(saved) = analysis.saved_viewport {
            self.restore_frequency_viewport(saved)?;
        }
        self.interaction.exit_analysis();
        debug!("left analysis mode");
        self.invalidate();
        Ok(())
    }

    /// Host click gesture released after `n_press` presses: one press
    /// selects, two toggle analysis mode. Ends any drag, and ignores the
    /// gesture when its press panned further than
    /// [`crate::interaction::CLICK_SLOP_PX`].
    pub fn click_released(&mut self, n_press: u32, x: f64, y: f64) -> ScopeResult<bool> {
        let travelled = self.interaction.press_travelled();
        self.pointer_up();
        if travelled {
            trace!(n_press, "click gesture consumed by pan");
            return Ok(false);
        }
        match n_press {
            1 => self.click(x, y),
            2 => self.double_click(x, y),
            _ => Ok(false),
        }
    }

    /// Selects the bins around the clicked bin while analysing.
    ///
    /// Returns `false` when the click is ignored: outside analysis mode,
    /// off the spectrum, or on a bin the frame does not list as analysable.
    pub fn click(&mut self, x: f64, y: f64) -> ScopeResult<bool> {
        if !x.is_finite() || !y.is_finite() {
            warn!(x, y, "ignoring click with non-finite coordinates");
            return Ok(false);
        }
        if !self.interaction.analysis().active {
            return Ok(false);
        }
        let Some(bin) = self.frequency_bin_at(x, y) else {
            return Ok(false);
        };
        if self.frame.analysis_bins.is_some() && !self.frame.is_analysis_bin(bin) {
            debug!(bin, "rejected click outside analysis bins");
            return Ok(false);
        }

        let bins = match self.frame.overlay_bins_for(bin) {
            Some(overlay) => overlay.clone(),
            None => self.fallback_selection_bins(bin),
        };
        debug!(bin, selected = bins.len(), "selection updated");
        self.interaction.set_selection(Selection::new(bin, bins));
        self.invalidate();
        Ok(true)
    }

    pub fn clear_selection(&mut self) {
        if self.interaction.selection().is_some() {
            self.interaction.clear_selection();
            self.invalidate();
        }
    }

    /// Detail chart of the current selection (or, without one, the
    /// highlight range) while analysing.
    pub fn analysis_detail_scene(&self, surface: SurfaceSize) -> ScopeResult<Option<RenderScene>> {
        if !self.interaction.analysis().active {
            return Ok(None);
        }
        let range = match self.interaction.selection() {
            Some(selection) => match (selection.bins.first(), selection.bins.last()) {
                (Some(&first), Some(&last)) => Some(BinRange::new(first, last + 1)),
                _ => None,
            },
            None => self.frame.active_highlight_range(),
        };
        let Some(range) = range else {
            return Ok(None);
        };
        let threshold = self.frame.active_threshold().unwrap_or(0.0);
        build_analysis_detail_scene(surface, &self.frame.spectrum, range, threshold, self.style)
            .map(Some)
    }

    fn frequency_bin_at(&self, x: f64, y: f64) -> Option<usize> {
        if self.layout.axis_at(y) != Axis::Frequency {
            return None;
        }
        let plot_x = self.layout.plot_x(x);
        if !self.layout.contains_plot_x(plot_x) {
            return None;
        }
        pixel_to_index(plot_x, self.frequency_viewport, self.frame.spectrum.len())
    }

    /// `[bin - radius, bin + radius)` clipped to the spectrum.
    fn fallback_selection_bins(&self, bin: usize) -> BTreeSet<usize> {
        let radius = self.config.selection_radius;
        let start = bin.saturating_sub(radius);
        let end = bin.saturating_add(radius).min(self.frame.spectrum.len());
        (start..end).collect()
    }
}
