//! The tempo curve data model.
//!
//! This module owns the sparse progress→BPM mapping and enforces its
//! invariants: both endpoints (progress 0 and 100) are always present,
//! at least two points exist at all times, and every BPM value is a
//! positive finite number.

use std::collections::BTreeMap;

/// Grid step for progress snapping, in percent.
pub const PROGRESS_STEPS: u8 = 5;

/// Grid step for BPM gridlines and bounds padding.
pub const BPM_STEPS: f64 = 5.0;

/// BPM assigned to points created without an explicit tempo.
pub const DEFAULT_BPM: f64 = 50.0;

/// Progress key of the first endpoint.
pub const PROGRESS_MIN: u8 = 0;

/// Progress key of the last endpoint.
pub const PROGRESS_MAX: u8 = 100;

/// Sparse mapping from playlist progress (0–100 %) to tempo (BPM).
///
/// Keys are unique and iterate in ascending progress order. Every
/// mutating method repairs the endpoint invariant before it returns,
/// so consumers never observe a model without keys 0 and 100.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveModel {
    /// Points keyed by progress; BTreeMap keeps them sorted and unique.
    points: BTreeMap<u8, f64>,
    /// Progress snap grid for `set` and pointer input.
    progress_steps: u8,
}

impl Default for CurveModel {
    fn default() -> Self {
        Self::new(PROGRESS_STEPS)
    }
}

impl CurveModel {
    /// Create a model seeded with the default five-point curve.
    pub fn new(progress_steps: u8) -> Self {
        let points = BTreeMap::from([
            (0, 50.0),
            (20, 70.0),
            (50, 60.0),
            (70, 100.0),
            (100, 50.0),
        ]);
        Self {
            points,
            progress_steps: progress_steps.max(1),
        }
    }

    /// Iterate points in ascending progress order.
    pub fn points(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.points.iter().map(|(&p, &b)| (p, b))
    }

    /// Iterate the BPM values only.
    pub fn bpms(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.values().copied()
    }

    /// Number of points in the curve.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if a point exists exactly at the given progress.
    pub fn contains(&self, progress: u8) -> bool {
        self.points.contains_key(&progress)
    }

    /// Get the BPM at the given progress, if a point exists there.
    pub fn bpm_at(&self, progress: u8) -> Option<f64> {
        self.points.get(&progress).copied()
    }

    /// Returns true if deleting a (non-endpoint) point is currently allowed.
    pub fn can_delete(&self) -> bool {
        self.points.len() > 2
    }

    /// Returns true if the given point's delete control should be enabled.
    pub fn is_deletable(&self, progress: u8) -> bool {
        self.can_delete() && progress != PROGRESS_MIN && progress != PROGRESS_MAX
    }

    /// Snap a raw progress value to the nearest grid multiple, clamped to [0, 100].
    pub fn snap_progress(&self, raw: f64) -> u8 {
        let steps = f64::from(self.progress_steps);
        let snapped = (raw / steps).round() * steps;
        snapped.clamp(0.0, f64::from(PROGRESS_MAX)) as u8
    }

    /// Insert or overwrite the point at the given progress.
    ///
    /// Progress is snapped to the grid before insertion. A non-finite or
    /// non-positive BPM is refused and the prior value retained.
    ///
    /// # Returns
    /// `true` if the model changed or the value was (re)written, `false`
    /// if the input was refused.
    pub fn set(&mut self, progress: u8, bpm: f64) -> bool {
        if !bpm.is_finite() || bpm <= 0.0 {
            return false;
        }
        let progress = self.snap_progress(f64::from(progress));
        self.points.insert(progress, bpm);
        self.repair_endpoints();
        true
    }

    /// Delete the point at the given progress.
    ///
    /// Refused (no-op returning `false`) when the point is an endpoint,
    /// when fewer than three points exist, or when no point exists there.
    pub fn delete(&mut self, progress: u8) -> bool {
        if progress == PROGRESS_MIN || progress == PROGRESS_MAX {
            return false;
        }
        if !self.can_delete() {
            return false;
        }
        let removed = self.points.remove(&progress).is_some();
        if removed {
            self.repair_endpoints();
        }
        removed
    }

    /// Re-key the point at `from` to `to`, keeping its BPM.
    ///
    /// Overwrites any point already at `to`. Used by the row editor when a
    /// timestamp edit moves a breakpoint. Refused when no point exists at
    /// `from`.
    pub fn move_point(&mut self, from: u8, to: u8) -> bool {
        if from == to {
            return self.points.contains_key(&from);
        }
        let Some(bpm) = self.points.remove(&from) else {
            return false;
        };
        self.points.insert(self.snap_progress(f64::from(to)), bpm);
        self.repair_endpoints();
        true
    }

    /// Restore the endpoint invariant after a mutation.
    ///
    /// For each missing endpoint: with fewer than two points remaining a
    /// default-BPM point is inserted at the endpoint; otherwise the nearest
    /// remaining point (lowest key for 0, highest for 100) is re-keyed to
    /// the endpoint. Endpoint 0 is repaired before endpoint 100.
    fn repair_endpoints(&mut self) {
        if !self.points.contains_key(&PROGRESS_MIN) {
            if self.points.len() < 2 {
                self.points.insert(PROGRESS_MIN, DEFAULT_BPM);
            } else if let Some((&lowest, _)) = self.points.first_key_value() {
                let bpm = self.points.remove(&lowest).unwrap_or(DEFAULT_BPM);
                self.points.insert(PROGRESS_MIN, bpm);
            }
        }
        if !self.points.contains_key(&PROGRESS_MAX) {
            if self.points.len() < 2 {
                self.points.insert(PROGRESS_MAX, DEFAULT_BPM);
            } else if let Some((&highest, _)) = self.points.last_key_value() {
                let bpm = self.points.remove(&highest).unwrap_or(DEFAULT_BPM);
                self.points.insert(PROGRESS_MAX, bpm);
            }
        }
    }

    /// Build a model from explicit points, applying the endpoint repair.
    ///
    /// Intended for tests and for external callers that already hold a
    /// point list; the usual entry points are `set`/`delete`/`move_point`.
    pub fn from_points(points: impl IntoIterator<Item = (u8, f64)>, progress_steps: u8) -> Self {
        let mut model = Self {
            points: points
                .into_iter()
                .filter(|&(_, bpm)| bpm.is_finite() && bpm > 0.0)
                .collect(),
            progress_steps: progress_steps.max(1),
        };
        model.repair_endpoints();
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(points: &[(u8, f64)]) -> CurveModel {
        CurveModel::from_points(points.iter().copied(), PROGRESS_STEPS)
    }

    fn keys(model: &CurveModel) -> Vec<u8> {
        model.points().map(|(p, _)| p).collect()
    }

    #[test]
    fn test_default_seed_curve() {
        let model = CurveModel::default();
        assert_eq!(
            model.points().collect::<Vec<_>>(),
            vec![
                (0, 50.0),
                (20, 70.0),
                (50, 60.0),
                (70, 100.0),
                (100, 50.0)
            ]
        );
    }

    #[test]
    fn test_endpoints_always_present() {
        let mut model = CurveModel::default();
        model.set(35, 80.0);
        model.delete(50);
        model.move_point(20, 40);
        assert!(model.contains(0));
        assert!(model.contains(100));
        assert!(model.len() >= 2);
    }

    #[test]
    fn test_set_snaps_progress_to_grid() {
        let mut model = CurveModel::default();
        assert!(model.set(33, 90.0));
        assert!(model.contains(35));
        assert!(!model.contains(33));
    }

    #[test]
    fn test_set_rejects_invalid_bpm() {
        let mut model = CurveModel::default();
        let before = model.clone();
        assert!(!model.set(50, 0.0));
        assert!(!model.set(50, -10.0));
        assert!(!model.set(50, f64::NAN));
        assert!(!model.set(50, f64::INFINITY));
        assert_eq!(model, before);
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut once = CurveModel::default();
        once.set(45, 95.0);
        let mut twice = CurveModel::default();
        twice.set(45, 95.0);
        twice.set(45, 95.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_delete_middle_point() {
        let mut m = model(&[(0, 50.0), (30, 70.0), (100, 60.0)]);
        assert!(m.delete(30));
        assert_eq!(m.points().collect::<Vec<_>>(), vec![(0, 50.0), (100, 60.0)]);
    }

    #[test]
    fn test_delete_refused_on_two_point_model() {
        let mut m = model(&[(0, 50.0), (100, 60.0)]);
        let before = m.clone();
        assert!(!m.delete(0));
        assert!(!m.delete(100));
        assert_eq!(m, before);
    }

    #[test]
    fn test_delete_refused_on_endpoints() {
        let mut m = model(&[(0, 50.0), (30, 70.0), (100, 60.0)]);
        assert!(!m.delete(0));
        assert!(!m.delete(100));
        assert!(m.contains(30));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_delete_missing_point_is_noop() {
        let mut m = model(&[(0, 50.0), (30, 70.0), (100, 60.0)]);
        assert!(!m.delete(55));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_repair_rekeys_lowest_to_zero() {
        let m = model(&[(10, 42.0), (60, 80.0), (100, 55.0)]);
        assert_eq!(m.bpm_at(0), Some(42.0));
        assert!(!m.contains(10));
    }

    #[test]
    fn test_repair_rekeys_highest_to_hundred() {
        let m = model(&[(0, 42.0), (60, 80.0), (90, 55.0)]);
        assert_eq!(m.bpm_at(100), Some(55.0));
        assert!(!m.contains(90));
    }

    #[test]
    fn test_repair_inserts_default_when_too_few_points() {
        let m = model(&[(30, 75.0)]);
        // 0 gets the default, then the single remaining middle point
        // becomes the new 100.
        assert_eq!(m.bpm_at(0), Some(DEFAULT_BPM));
        assert_eq!(m.bpm_at(100), Some(75.0));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_repair_from_empty() {
        let m = model(&[]);
        assert_eq!(m.bpm_at(0), Some(DEFAULT_BPM));
        assert_eq!(m.bpm_at(100), Some(DEFAULT_BPM));
    }

    #[test]
    fn test_move_point_rekeys_and_repairs() {
        let mut m = model(&[(0, 50.0), (30, 70.0), (100, 60.0)]);
        assert!(m.move_point(30, 45));
        assert_eq!(m.bpm_at(45), Some(70.0));
        assert_eq!(keys(&m), vec![0, 45, 100]);
    }

    #[test]
    fn test_move_point_overwrites_occupied_target() {
        let mut m = model(&[(0, 50.0), (30, 70.0), (45, 90.0), (100, 60.0)]);
        assert!(m.move_point(30, 45));
        assert_eq!(m.bpm_at(45), Some(70.0));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_move_point_missing_source_refused() {
        let mut m = model(&[(0, 50.0), (100, 60.0)]);
        assert!(!m.move_point(40, 60));
    }

    #[test]
    fn test_snap_progress() {
        let m = CurveModel::default();
        assert_eq!(m.snap_progress(0.0), 0);
        assert_eq!(m.snap_progress(2.4), 0);
        assert_eq!(m.snap_progress(2.5), 5);
        assert_eq!(m.snap_progress(98.0), 100);
        assert_eq!(m.snap_progress(140.0), 100);
        assert_eq!(m.snap_progress(-3.0), 0);
    }

    #[test]
    fn test_deletable_flags() {
        let m = model(&[(0, 50.0), (30, 70.0), (100, 60.0)]);
        assert!(m.can_delete());
        assert!(m.is_deletable(30));
        assert!(!m.is_deletable(0));
        assert!(!m.is_deletable(100));

        let two = model(&[(0, 50.0), (100, 60.0)]);
        assert!(!two.can_delete());
        assert!(!two.is_deletable(0));
    }
}
