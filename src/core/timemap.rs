//! Conversion between playlist progress and wall-clock timestamps.
//!
//! Progress is a percentage of the playlist duration; timestamps use the
//! `HH:mm` form with epoch semantics (hours wrap at 24, no timezone or
//! calendar effects).

use thiserror::Error;

use super::duration::{MS_PER_HOUR, MS_PER_MINUTE};

/// Errors from parsing a timestamp back into a progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeError {
    /// The text does not match the `[0-5][0-9]:[0-5][0-9]` pattern.
    #[error("timestamp must match HH:mm")]
    InvalidFormat,
    /// The parsed time lies beyond the playlist duration.
    #[error("timestamp exceeds the playlist duration")]
    PastEnd,
    /// The playlist duration is zero, so no progress can be derived.
    #[error("playlist duration is zero")]
    ZeroDuration,
}

/// Format the elapsed time at the given progress as `HH:mm`.
///
/// Elapsed time is `duration_ms * progress / 100`; hours are formatted
/// modulo 24 (epoch semantics).
pub fn progress_to_time(progress: u8, duration_ms: u64) -> String {
    let elapsed_ms = duration_ms * u64::from(progress) / 100;
    let hours = (elapsed_ms / MS_PER_HOUR) % 24;
    let minutes = (elapsed_ms % MS_PER_HOUR) / MS_PER_MINUTE;
    format!("{:02}:{:02}", hours, minutes)
}

/// Parse an `HH:mm` timestamp into a snapped progress value.
///
/// The result is rounded to the nearest multiple of `progress_steps`.
/// Fails when the text does not match `[0-5][0-9]:[0-5][0-9]`, when the
/// duration is zero, or when the time lies past the end of the playlist.
pub fn time_to_progress(text: &str, duration_ms: u64, progress_steps: u8) -> Result<u8, TimeError> {
    let (hours, minutes) = parse_hhmm(text).ok_or(TimeError::InvalidFormat)?;
    if duration_ms == 0 {
        return Err(TimeError::ZeroDuration);
    }
    let elapsed_ms = u64::from(hours) * MS_PER_HOUR + u64::from(minutes) * MS_PER_MINUTE;
    if elapsed_ms > duration_ms {
        return Err(TimeError::PastEnd);
    }
    let steps = f64::from(progress_steps.max(1));
    let raw = 100.0 * elapsed_ms as f64 / duration_ms as f64;
    let snapped = (raw / steps).round() * steps;
    Ok(snapped.clamp(0.0, 100.0) as u8)
}

/// Returns true if the text is a well-formed `HH:mm` timestamp.
pub fn is_valid_time(text: &str) -> bool {
    parse_hhmm(text).is_some()
}

/// Parse `[0-5][0-9]:[0-5][0-9]` into (hours, minutes).
///
/// The pattern caps both fields at 59, matching the validation the row
/// editor applies before committing a timestamp.
fn parse_hhmm(text: &str) -> Option<(u32, u32)> {
    let bytes = text.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    let digit = |b: u8, max: u8| (b.is_ascii_digit() && b - b'0' <= max).then(|| u32::from(b - b'0'));
    let hours = digit(bytes[0], 5)? * 10 + digit(bytes[1], 9)?;
    let minutes = digit(bytes[3], 5)? * 10 + digit(bytes[4], 9)?;
    Some((hours, minutes))
}
