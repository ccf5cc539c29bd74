//! Playlist duration handling.
//!
//! The duration is entered as hours and minutes and never allowed to be
//! zero overall; everything downstream works with the derived millisecond
//! total.

/// Milliseconds in one hour.
pub const MS_PER_HOUR: u64 = 3_600_000;

/// Milliseconds in one minute.
pub const MS_PER_MINUTE: u64 = 60_000;

/// Total playlist duration as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaylistDuration {
    /// Whole hours (non-negative, unbounded).
    pub hours: u32,
    /// Minutes in [0, 59] after normalization.
    pub minutes: u32,
}

impl Default for PlaylistDuration {
    fn default() -> Self {
        Self { hours: 1, minutes: 0 }
    }
}

impl PlaylistDuration {
    /// Create a duration, applying normalization immediately.
    pub fn new(hours: u32, minutes: u32) -> Self {
        let mut duration = Self { hours, minutes };
        duration.normalize();
        duration
    }

    /// Clamp minutes into [0, 59] and reset an all-zero duration to 1:00.
    pub fn normalize(&mut self) {
        if self.minutes > 59 {
            self.minutes = 59;
        }
        if self.hours == 0 && self.minutes == 0 {
            *self = Self::default();
        }
    }

    /// Total duration in milliseconds.
    pub fn as_millis(&self) -> u64 {
        u64::from(self.hours) * MS_PER_HOUR + u64::from(self.minutes) * MS_PER_MINUTE
    }
}
