use serde::{Deserialize, Serialize};

use crate::core::mapper::pixel_to_domain;
use crate::error::{ScopeError, ScopeResult};

/// Multiplicative scale step applied by one wheel notch.
pub const DEFAULT_ZOOM_STEP: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Negative wheel delta zooms in, positive zooms out, zero is ignored.
    #[must_use]
    pub fn from_wheel_delta(delta_y: f64) -> Option<Self> {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return None;
        }
        if delta_y < 0.0 {
            Some(Self::In)
        } else {
            Some(Self::Out)
        }
    }
}

/// Exact copy of one axis viewport, used to leave analysis mode and to
/// carry viewports across plot recreation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    pub scale: f64,
    pub offset: f64,
}

/// Visible window of one axis: `scale` pixels per domain unit and `offset`
/// domain units hidden left of the plot.
///
/// Every mutating operation ends with [`AxisViewport::clamp`], so consumers
/// may rely on `scale > 0`, `offset >= 0`, both finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisViewport {
    scale: f64,
    offset: f64,
}

impl Default for AxisViewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: 0.0,
        }
    }
}

impl AxisViewport {
    pub fn new(scale: f64, offset: f64) -> ScopeResult<Self> {
        validate_scale_offset(scale, offset)?;
        Ok(Self { scale, offset })
    }

    #[must_use]
    pub fn scale(self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn offset(self) -> f64 {
        self.offset
    }

    /// Domain units covered by `width_px` pixels.
    #[must_use]
    pub fn visible_span(self, width_px: f64) -> f64 {
        width_px / self.scale
    }

    /// Zooms one step around `anchor_px`, keeping the domain point under the
    /// anchor in place.
    pub fn zoom_at_point(
        &mut self,
        direction: ZoomDirection,
        anchor_px: f64,
        domain_len: f64,
        width_px: f64,
    ) -> ScopeResult<()> {
        self.zoom_at_point_with_step(direction, DEFAULT_ZOOM_STEP, anchor_px, domain_len, width_px)
    }

    pub fn zoom_at_point_with_step(
        &mut self,
        direction: ZoomDirection,
        step: f64,
        anchor_px: f64,
        domain_len: f64,
        width_px: f64,
    ) -> ScopeResult<()> {
        if !step.is_finite() || step <= 1.0 {
            return Err(ScopeError::InvalidData(
                "zoom step must be finite and > 1".to_owned(),
            ));
        }
        if !anchor_px.is_finite() {
            return Err(ScopeError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }
        let Some(min_scale) = min_scale(domain_len, width_px)? else {
            return Ok(());
        };

        let anchor_domain = pixel_to_domain(anchor_px, *self);
        let next_scale = match direction {
            ZoomDirection::In => self.scale * step,
            ZoomDirection::Out => self.scale / step,
        }
        .max(min_scale);

        self.scale = next_scale;
        self.offset = anchor_domain - anchor_px / next_scale;
        self.clamp(domain_len, width_px)
    }

    /// Scrolls by a pointer displacement; dragging right reveals earlier data.
    pub fn pan(&mut self, delta_px: f64, domain_len: f64, width_px: f64) -> ScopeResult<()> {
        if !delta_px.is_finite() {
            return Err(ScopeError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        if min_scale(domain_len, width_px)?.is_none() {
            return Ok(());
        }

        self.offset -= delta_px / self.scale;
        self.clamp(domain_len, width_px)
    }

    /// Restores the viewport invariants for the given domain and plot width.
    pub fn clamp(&mut self, domain_len: f64, width_px: f64) -> ScopeResult<()> {
        let Some(min_scale) = min_scale(domain_len, width_px)? else {
            return Ok(());
        };

        if !self.scale.is_finite() || self.scale < min_scale {
            self.scale = min_scale;
        }
        let max_offset = (domain_len - width_px / self.scale).max(0.0);
        self.offset = if self.offset.is_finite() {
            self.offset.clamp(0.0, max_offset)
        } else {
            0.0
        };
        Ok(())
    }

    /// Fits `[start, end)` exactly into the plot width.
    pub fn zoom_to_range(
        &mut self,
        start: f64,
        end: f64,
        domain_len: f64,
        width_px: f64,
    ) -> ScopeResult<()> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ScopeError::InvalidData(
                "zoom range must be finite".to_owned(),
            ));
        }
        if min_scale(domain_len, width_px)?.is_none() {
            return Ok(());
        }

        self.scale = width_px / (end - start).max(1.0);
        self.offset = start.max(0.0);
        self.clamp(domain_len, width_px)
    }

    #[must_use]
    pub fn snapshot(self) -> ViewportSnapshot {
        ViewportSnapshot {
            scale: self.scale,
            offset: self.offset,
        }
    }

    /// Replays a snapshot verbatim.
    pub fn restore(&mut self, snapshot: ViewportSnapshot) -> ScopeResult<()> {
        validate_scale_offset(snapshot.scale, snapshot.offset)?;
        self.scale = snapshot.scale;
        self.offset = snapshot.offset;
        Ok(())
    }
}

impl From<AxisViewport> for ViewportSnapshot {
    fn from(viewport: AxisViewport) -> Self {
        viewport.snapshot()
    }
}

/// Smallest scale that still fits the whole domain, or `None` when the
/// domain or the plot is empty and the caller should short-circuit.
fn min_scale(domain_len: f64, width_px: f64) -> ScopeResult<Option<f64>> {
    if !domain_len.is_finite() || !width_px.is_finite() {
        return Err(ScopeError::InvalidData(
            "domain length and plot width must be finite".to_owned(),
        ));
    }
    if domain_len <= 0.0 || width_px <= 0.0 {
        return Ok(None);
    }
    Ok(Some(width_px / domain_len))
}

fn validate_scale_offset(scale: f64, offset: f64) -> ScopeResult<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ScopeError::InvalidData(
            "viewport scale must be finite and > 0".to_owned(),
        ));
    }
    if !offset.is_finite() || offset < 0.0 {
        return Err(ScopeError::InvalidData(
            "viewport offset must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{AxisViewport, ZoomDirection};
    use crate::core::mapper::{domain_to_pixel, pixel_to_domain};

    #[test]
    fn wheel_zoom_keeps_anchor_domain_in_place() {
        let mut viewport = AxisViewport::default();
        let before = pixel_to_domain(250.0, viewport);

        viewport
            .zoom_at_point(ZoomDirection::In, 250.0, 1000.0, 500.0)
            .expect("zoom in");

        assert_relative_eq!(viewport.scale(), 1.1, epsilon = 1e-12);
        assert!((domain_to_pixel(before, viewport) - 250.0).abs() <= 1.0);
    }

    #[test]
    fn zoom_out_floors_at_whole_domain() {
        let mut viewport = AxisViewport::default();
        for _ in 0..20 {
            viewport
                .zoom_at_point(ZoomDirection::Out, 100.0, 1000.0, 500.0)
                .expect("zoom out");
        }
        assert_relative_eq!(viewport.scale(), 0.5, epsilon = 1e-12);
        assert_eq!(viewport.offset(), 0.0);
    }

    #[test]
    fn pan_is_absorbed_by_clamp() {
        let mut viewport = AxisViewport::default();
        viewport.pan(10_000.0, 1000.0, 500.0).expect("pan right");
        assert_eq!(viewport.offset(), 0.0);

        viewport.pan(-10_000.0, 1000.0, 500.0).expect("pan left");
        assert_relative_eq!(viewport.offset(), 500.0, epsilon = 1e-12);
    }

    #[test]
    fn zoom_to_range_fits_span() {
        let mut viewport = AxisViewport::default();
        viewport
            .zoom_to_range(330.0, 500.0, 2048.0, 700.0)
            .expect("zoom to range");
        assert_eq!(viewport.scale(), 700.0 / 170.0);
        assert_eq!(viewport.offset(), 330.0);
    }

    #[test]
    fn zero_width_short_circuits() {
        let mut viewport = AxisViewport::new(3.0, 4.0).expect("viewport");
        viewport
            .zoom_at_point(ZoomDirection::In, 10.0, 1000.0, 0.0)
            .expect("noop zoom");
        viewport.pan(50.0, 0.0, 500.0).expect("noop pan");
        viewport.clamp(1000.0, 0.0).expect("noop clamp");
        assert_eq!(viewport, AxisViewport::new(3.0, 4.0).expect("viewport"));
    }

    #[test]
    fn rejects_non_finite_inputs_without_mutation() {
        let mut viewport = AxisViewport::default();
        assert!(viewport.pan(f64::NAN, 1000.0, 500.0).is_err());
        assert!(
            viewport
                .zoom_at_point(ZoomDirection::In, f64::INFINITY, 1000.0, 500.0)
                .is_err()
        );
        assert_eq!(viewport, AxisViewport::default());
    }

    #[test]
    fn snapshot_restore_is_exact() {
        let mut viewport = AxisViewport::new(1.732, 12.25).expect("viewport");
        let snapshot = viewport.snapshot();
        viewport
            .zoom_to_range(0.0, 10.0, 100.0, 300.0)
            .expect("zoom to range");
        viewport.restore(snapshot).expect("restore");
        assert_eq!(viewport.snapshot(), snapshot);
    }
}
