use serde::{Deserialize, Serialize};

use crate::core::{Axis, SurfaceSize};

/// Fixed gutters around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotMargins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

pub const PLOT_MARGINS: PlotMargins = PlotMargins {
    left: 60.0,
    right: 20.0,
    top: 20.0,
    bottom: 40.0,
};

const TIME_REGION_SHARE: f64 = 0.475;
const REGION_GAP_SHARE: f64 = 0.05;

/// Vertical band of the surface holding one axis' plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRegion {
    pub top: f64,
    pub height: f64,
}

impl PlotRegion {
    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Surface y of `value` on a `[0, full_scale]` vertical scale, clamped
    /// to the region.
    #[must_use]
    pub fn value_to_y(self, value: f64, full_scale: f64) -> f64 {
        let normalized = if value.is_finite() && full_scale > 0.0 {
            (value / full_scale).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.bottom() - self.height * normalized
    }

    #[must_use]
    pub fn contains_y(self, y: f64) -> bool {
        y >= self.top && y <= self.bottom()
    }
}

/// Split of the surface into margins and per-axis plot regions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub surface: SurfaceSize,
    pub margins: PlotMargins,
    pub plot_left: f64,
    /// Viewport pixel width shared by both axes.
    pub plot_width: f64,
    pub time_region: Option<PlotRegion>,
    pub frequency_region: PlotRegion,
}

impl PlotLayout {
    #[must_use]
    pub fn compute(surface: SurfaceSize, show_time_axis: bool) -> Self {
        let margins = PLOT_MARGINS;
        let plot_width =
            (f64::from(surface.width) - margins.left - margins.right).max(0.0);
        let inner_height =
            (f64::from(surface.height) - margins.top - margins.bottom).max(0.0);

        let (time_region, frequency_region) = if show_time_axis {
            let region_height = inner_height * TIME_REGION_SHARE;
            let gap = inner_height * REGION_GAP_SHARE;
            (
                Some(PlotRegion {
                    top: margins.top,
                    height: region_height,
                }),
                PlotRegion {
                    top: margins.top + region_height + gap,
                    height: region_height,
                },
            )
        } else {
            (
                None,
                PlotRegion {
                    top: margins.top,
                    height: inner_height,
                },
            )
        };

        Self {
            surface,
            margins,
            plot_left: margins.left,
            plot_width,
            time_region,
            frequency_region,
        }
    }

    #[must_use]
    pub fn region(self, axis: Axis) -> Option<PlotRegion> {
        match axis {
            Axis::Time => self.time_region,
            Axis::Frequency => Some(self.frequency_region),
        }
    }

    /// Axis whose band contains surface `y`; the gap between the two bands
    /// is split at its middle.
    #[must_use]
    pub fn axis_at(self, y: f64) -> Axis {
        match self.time_region {
            Some(time) => {
                let split = (time.bottom() + self.frequency_region.top) / 2.0;
                if y < split { Axis::Time } else { Axis::Frequency }
            }
            None => Axis::Frequency,
        }
    }

    /// Converts a surface x coordinate into plot-local pixels.
    #[must_use]
    pub fn plot_x(self, surface_x: f64) -> f64 {
        surface_x - self.plot_left
    }

    #[must_use]
    pub fn surface_x(self, plot_x: f64) -> f64 {
        self.plot_left + plot_x
    }

    #[must_use]
    pub fn contains_plot_x(self, plot_x: f64) -> bool {
        plot_x >= 0.0 && plot_x <= self.plot_width
    }
}
