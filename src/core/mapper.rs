//! Domain↔pixel transforms shared by drawing and hit-testing.
//!
//! Pixel values are plot-local: pixel `0` is the left edge of the plot
//! region, not of the surface. Every other module goes through these
//! functions instead of re-deriving the arithmetic.

use std::ops::Range;

use crate::core::AxisViewport;

/// Maps a domain position (sample or bin index) to a plot-local pixel.
#[must_use]
pub fn domain_to_pixel(index: f64, viewport: AxisViewport) -> f64 {
    (index - viewport.offset()) * viewport.scale()
}

/// Maps a plot-local pixel back to a domain position.
#[must_use]
pub fn pixel_to_domain(pixel: f64, viewport: AxisViewport) -> f64 {
    viewport.offset() + pixel / viewport.scale()
}

/// Resolves the discrete index under `pixel`, if it lies inside `[0, len)`.
#[must_use]
pub fn pixel_to_index(pixel: f64, viewport: AxisViewport, len: usize) -> Option<usize> {
    if !pixel.is_finite() {
        return None;
    }
    let domain = pixel_to_domain(pixel, viewport).floor();
    if domain < 0.0 || domain >= len as f64 {
        return None;
    }
    Some(domain as usize)
}

/// Index range visible through a plot of `width_px` pixels.
///
/// The range starts at the index partially covering pixel `0` and ends past
/// the index partially covering the right edge, clipped to `len`.
#[must_use]
pub fn visible_index_range(viewport: AxisViewport, width_px: f64, len: usize) -> Range<usize> {
    if len == 0 || !width_px.is_finite() || width_px <= 0.0 {
        return 0..0;
    }
    let first = pixel_to_domain(0.0, viewport).floor().max(0.0);
    let last = pixel_to_domain(width_px, viewport).ceil().max(0.0);
    let start = (first as usize).min(len);
    let end = (last as usize).min(len);
    start..end.max(start)
}
