use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{Axis, ViewportSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Dragging,
    /// Drill-down into the backend-declared highlight range.
    AnalysisLocked,
}

/// Keys the scope reacts to. Hosts map their native key codes onto this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeKey {
    Escape,
    Other,
}

/// Bins picked by a click in analysis mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub center_bin: usize,
    pub bins: BTreeSet<usize>,
}

impl Selection {
    #[must_use]
    pub fn new(center_bin: usize, bins: BTreeSet<usize>) -> Self {
        Self { center_bin, bins }
    }

    #[must_use]
    pub fn contains(&self, bin: usize) -> bool {
        self.bins.contains(&bin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipEntry {
    /// Sample index on the time axis, bin index on the frequency axis.
    pub index: usize,
    pub value: f64,
}

/// Hover readout anchored at the cursor position (surface coordinates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub axis: Axis,
    pub x: f64,
    pub y: f64,
    pub entries: Vec<TooltipEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisState {
    pub active: bool,
    pub saved_viewport: Option<ViewportSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    axis: Axis,
    last_x: f64,
}

/// Pointer travel below which a press and release still count as a click.
pub const CLICK_SLOP_PX: f64 = 4.0;

/// Mutable state of the pointer/keyboard state machine.
///
/// This type only records transitions; the engine decides what each
/// transition does to the viewports.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    drag: Option<DragState>,
    analysis: AnalysisState,
    selection: Option<Selection>,
    tooltip: Option<Tooltip>,
    cursor: Option<(f64, f64)>,
    press_origin: Option<(f64, f64)>,
    press_travelled: bool,
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        if self.analysis.active {
            InteractionMode::AnalysisLocked
        } else if self.drag.is_some() {
            InteractionMode::Dragging
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn drag_axis(&self) -> Option<Axis> {
        self.drag.map(|drag| drag.axis)
    }

    #[must_use]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    pub fn on_pointer_down(&mut self, axis: Axis, x: f64, y: f64) {
        self.drag = Some(DragState { axis, last_x: x });
        self.press_origin = Some((x, y));
        self.press_travelled = false;
    }

    /// Whether the latest press moved past [`CLICK_SLOP_PX`] while held.
    /// Survives the release so a late click report can still be judged.
    #[must_use]
    pub fn press_travelled(&self) -> bool {
        self.press_travelled
    }

    /// Advances an active drag and returns the axis and pixel delta to pan.
    pub fn on_drag_move(&mut self, x: f64) -> Option<(Axis, f64)> {
        let drag = self.drag.as_mut()?;
        let dx = x - drag.last_x;
        drag.last_x = x;
        Some((drag.axis, dx))
    }

    /// Drops a drag whose press stayed within [`CLICK_SLOP_PX`], so that the
    /// press behaves as a click. Returns whether a drag was dropped.
    pub fn cancel_stationary_drag(&mut self) -> bool {
        if self.drag.is_some() && !self.press_travelled {
            self.drag = None;
            return true;
        }
        false
    }

    pub fn on_pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
        if self.drag.is_none() {
            return;
        }
        if let Some((origin_x, origin_y)) = self.press_origin {
            if (x - origin_x).hypot(y - origin_y) >= CLICK_SLOP_PX {
                self.press_travelled = true;
            }
        }
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
        self.drag = None;
        self.tooltip = None;
    }

    #[must_use]
    pub fn analysis(&self) -> AnalysisState {
        self.analysis
    }

    pub fn enter_analysis(&mut self, saved_viewport: ViewportSnapshot) {
        self.analysis = AnalysisState {
            active: true,
            saved_viewport: Some(saved_viewport),
        };
        self.selection = None;
    }

    /// Leaves analysis mode and hands back the viewport saved on entry.
    pub fn exit_analysis(&mut self) -> Option<ViewportSnapshot> {
        let saved = self.analysis.saved_viewport.take();
        self.analysis.active = false;
        self.selection = None;
        self.tooltip = None;
        saved
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn set_tooltip(&mut self, tooltip: Option<Tooltip>) {
        self.tooltip = tooltip;
    }
}
