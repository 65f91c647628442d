use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_ZOOM_STEP, SurfaceSize};
use crate::error::{ScopeError, ScopeResult};

use super::axis_ticks::{AxisLabelPolicy, DEFAULT_LABEL_SNAP, DEFAULT_LABEL_SPACING_PX};

pub(super) const DEFAULT_SELECTION_RADIUS: usize = 10;

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can persist and reload the scope setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScopeEngineConfig {
    pub surface: SurfaceSize,
    #[serde(default = "default_show_time_axis")]
    pub show_time_axis: bool,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
    /// Half-width of the fallback selection window around a clicked bin.
    #[serde(default = "default_selection_radius")]
    pub selection_radius: usize,
    #[serde(default = "default_label_spacing_px")]
    pub label_spacing_px: f64,
    #[serde(default = "default_label_snap")]
    pub label_snap: u64,
}

impl ScopeEngineConfig {
    #[must_use]
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            surface,
            show_time_axis: default_show_time_axis(),
            zoom_step: default_zoom_step(),
            selection_radius: default_selection_radius(),
            label_spacing_px: default_label_spacing_px(),
            label_snap: default_label_snap(),
        }
    }

    #[must_use]
    pub fn with_show_time_axis(mut self, show: bool) -> Self {
        self.show_time_axis = show;
        self
    }

    #[must_use]
    pub fn with_zoom_step(mut self, zoom_step: f64) -> Self {
        self.zoom_step = zoom_step;
        self
    }

    #[must_use]
    pub fn with_selection_radius(mut self, radius: usize) -> Self {
        self.selection_radius = radius;
        self
    }

    #[must_use]
    pub fn with_label_policy(mut self, spacing_px: f64, snap: u64) -> Self {
        self.label_spacing_px = spacing_px;
        self.label_snap = snap;
        self
    }

    #[must_use]
    pub fn label_policy(self) -> AxisLabelPolicy {
        AxisLabelPolicy {
            spacing_px: self.label_spacing_px,
            snap: self.label_snap,
        }
    }

    pub fn validate(self) -> ScopeResult<Self> {
        if !self.surface.is_valid() {
            return Err(ScopeError::InvalidSurface {
                width: self.surface.width,
                height: self.surface.height,
            });
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(ScopeError::InvalidData(
                "zoom step must be finite and > 1".to_owned(),
            ));
        }
        if !self.label_spacing_px.is_finite() || self.label_spacing_px <= 0.0 {
            return Err(ScopeError::InvalidData(
                "label spacing must be finite and > 0".to_owned(),
            ));
        }
        if self.label_snap == 0 {
            return Err(ScopeError::InvalidData(
                "label snap must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn to_json_pretty(self) -> ScopeResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ScopeError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ScopeResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ScopeError::InvalidData(format!("failed to parse config json: {e}")))
    }
}

fn default_show_time_axis() -> bool {
    true
}

fn default_zoom_step() -> f64 {
    DEFAULT_ZOOM_STEP
}

fn default_selection_radius() -> usize {
    DEFAULT_SELECTION_RADIUS
}

fn default_label_spacing_px() -> f64 {
    DEFAULT_LABEL_SPACING_PX
}

fn default_label_snap() -> u64 {
    DEFAULT_LABEL_SNAP
}
