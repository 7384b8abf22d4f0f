use chrono::{DateTime, Utc};

/// 2001-01-01T00:00:00Z in Unix milliseconds, the zero point of Swift's `Date`.
pub const REFERENCE_EPOCH_MILLIS: i64 = 978_307_200_000;

/// Convert a Swift time interval (seconds since 2001-01-01 UTC, as written by
/// `JSONEncoder`) to a UTC date-time.
///
/// Fractional seconds are kept to the millisecond, truncated toward zero.
/// Returns `None` for non-finite input or an instant chrono cannot represent.
pub fn time_interval_to_date(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (REFERENCE_EPOCH_MILLIS as f64 + seconds * 1000.0).trunc();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}
