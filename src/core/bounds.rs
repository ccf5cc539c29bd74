//! Display bounds derived from the current curve data.
//!
//! Bounds are a pure function of the BPM values and the BPM grid step;
//! the application recomputes and caches them after every model change.

/// Visible BPM and progress range used to scale rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lowest visible BPM gridline.
    pub bpm_min: f64,
    /// Highest visible BPM gridline.
    pub bpm_max: f64,
    /// Lowest visible progress (always 0).
    pub progress_min: f64,
    /// Highest visible progress (always 100).
    pub progress_max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            bpm_min: 30.0,
            bpm_max: 150.0,
            progress_min: 0.0,
            progress_max: 100.0,
        }
    }
}

impl Bounds {
    /// Derive bounds from the curve's BPM values.
    ///
    /// The min and max BPM are rounded to the grid and padded by two grid
    /// steps on each side. An empty iterator yields the default bounds.
    pub fn from_bpms(bpms: impl IntoIterator<Item = f64>, bpm_steps: f64) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for bpm in bpms {
            min = min.min(bpm);
            max = max.max(bpm);
        }
        if !min.is_finite() || !max.is_finite() {
            return Self::default();
        }
        Self {
            bpm_min: ((min / bpm_steps).round() - 2.0) * bpm_steps,
            bpm_max: ((max / bpm_steps).round() + 2.0) * bpm_steps,
            ..Self::default()
        }
    }

    /// Height of the visible BPM range.
    pub fn bpm_span(&self) -> f64 {
        self.bpm_max - self.bpm_min
    }

    /// Width of the visible progress range.
    pub fn progress_span(&self) -> f64 {
        self.progress_max - self.progress_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_padding() {
        let bounds = Bounds::from_bpms([50.0, 100.0], 5.0);
        assert_eq!(bounds.bpm_min, 40.0);
        assert_eq!(bounds.bpm_max, 110.0);
        assert_eq!(bounds.progress_min, 0.0);
        assert_eq!(bounds.progress_max, 100.0);
    }

    #[test]
    fn test_bounds_round_to_grid() {
        // 52 rounds to 50 before padding, 97 rounds to 95 after rounding up.
        let bounds = Bounds::from_bpms([52.0, 97.0], 5.0);
        assert_eq!(bounds.bpm_min, 40.0);
        assert_eq!(bounds.bpm_max, 105.0);
    }

    #[test]
    fn test_bounds_flat_curve() {
        let bounds = Bounds::from_bpms([60.0, 60.0, 60.0], 5.0);
        assert_eq!(bounds.bpm_min, 50.0);
        assert_eq!(bounds.bpm_max, 70.0);
        assert!(bounds.bpm_span() > 0.0);
    }

    #[test]
    fn test_empty_input_yields_default() {
        assert_eq!(Bounds::from_bpms([], 5.0), Bounds::default());
    }

    #[test]
    fn test_spans() {
        let bounds = Bounds::from_bpms([50.0, 100.0], 5.0);
        assert_eq!(bounds.bpm_span(), 70.0);
        assert_eq!(bounds.progress_span(), 100.0);
    }
}
