use chrono::{DateTime, Timelike, Utc};

pub const SECONDS_PER_NIGHT: i64 = 86_400;

/// Drops sub-second precision so stored instants compare exactly.
pub fn truncate_to_seconds(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.with_nanosecond(0).unwrap_or(instant)
}

/// Number of nights charged for a stay, rounding any partial day up.
///
/// Returns 0 when `check_out` is not after `check_in`.
pub fn nights_between(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let seconds = (check_out - check_in).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    (seconds + SECONDS_PER_NIGHT - 1) / SECONDS_PER_NIGHT
}
