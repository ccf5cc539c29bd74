//! Pure transforms between (progress, BPM) domain space and pixel space.
//!
//! The vertical axis is inverted: higher BPM maps to a smaller y. All
//! functions are stateless and round-trip within floating-point tolerance.

use super::bounds::Bounds;

/// Map a BPM value to a y pixel coordinate inside a surface of `height`.
pub fn bpm_to_y(bpm: f64, bounds: &Bounds, height: f64) -> f64 {
    height * (1.0 - (bpm - bounds.bpm_min) / bounds.bpm_span())
}

/// Map a y pixel coordinate back to a BPM value. Exact inverse of `bpm_to_y`.
pub fn y_to_bpm(y: f64, bounds: &Bounds, height: f64) -> f64 {
    bounds.bpm_min + (1.0 - y / height) * bounds.bpm_span()
}

/// Map a progress percentage to an x pixel coordinate.
pub fn progress_to_x(progress: u8, bounds: &Bounds, width: f64) -> f64 {
    (f64::from(progress) - bounds.progress_min) / bounds.progress_span() * width
}

/// Map an x pixel coordinate to a progress percentage snapped to the grid.
pub fn x_to_progress(x: f64, bounds: &Bounds, width: f64, progress_steps: u8) -> u8 {
    let steps = f64::from(progress_steps.max(1));
    let raw = bounds.progress_min + x / width * bounds.progress_span();
    let snapped = (raw / steps).round() * steps;
    snapped.clamp(bounds.progress_min.max(0.0), bounds.progress_max.min(100.0)) as u8
}
