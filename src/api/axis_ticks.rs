use serde::{Deserialize, Serialize};

use crate::core::AxisViewport;

pub(super) const DEFAULT_LABEL_SPACING_PX: f64 = 60.0;
pub(super) const DEFAULT_LABEL_SNAP: u64 = 5;

/// Label density knobs shared by tick labels and vertical grid lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLabelPolicy {
    /// Target pixel distance between neighbouring labels.
    pub spacing_px: f64,
    /// Label values are multiples of this.
    pub snap: u64,
}

impl Default for AxisLabelPolicy {
    fn default() -> Self {
        Self {
            spacing_px: DEFAULT_LABEL_SPACING_PX,
            snap: DEFAULT_LABEL_SNAP,
        }
    }
}

/// Domain distance between ticks: the domain span of `spacing_px` pixels,
/// rounded up to a multiple of `snap`.
pub(super) fn axis_tick_step(scale: f64, policy: AxisLabelPolicy) -> u64 {
    let snap = policy.snap.max(1);
    if !scale.is_finite() || scale <= 0.0 || !policy.spacing_px.is_finite() {
        return snap;
    }
    let raw = policy.spacing_px.max(1.0) / scale / snap as f64;
    let multiples = raw.ceil();
    if !multiples.is_finite() || multiples < 1.0 {
        return snap;
    }
    (multiples as u64).saturating_mul(snap)
}

/// Tick values inside the visible window, clipped to `[0, domain_len]`.
pub(super) fn axis_tick_values(
    viewport: AxisViewport,
    width_px: f64,
    domain_len: usize,
    policy: AxisLabelPolicy,
) -> Vec<u64> {
    if domain_len == 0 || !width_px.is_finite() || width_px <= 0.0 {
        return Vec::new();
    }

    let step = axis_tick_step(viewport.scale(), policy);
    let window_start = viewport.offset().max(0.0);
    let window_end = (viewport.offset() + viewport.visible_span(width_px)).min(domain_len as f64);
    if window_end < window_start {
        return Vec::new();
    }

    let first = ((window_start / step as f64).ceil() as u64).saturating_mul(step);
    let mut ticks = Vec::new();
    let mut value = first;
    while (value as f64) <= window_end {
        ticks.push(value);
        value = match value.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    ticks
}
