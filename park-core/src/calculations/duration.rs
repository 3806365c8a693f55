use chrono::TimeDelta;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Renders an elapsed time as `"{h}h {m}m"`, or `"{m}m"` under an hour.
///
/// Minutes are rounded half-up. A remainder that rounds to 60 minutes is
/// carried into the hour, so 1h 59m 40s reads `"2h 0m"`, never `"1h 60m"`.
/// Negative durations render as `"0m"`.
pub fn duration_label(elapsed: TimeDelta) -> String {
    let millis = elapsed.num_milliseconds().max(0);
    let total_minutes = (millis + MILLIS_PER_MINUTE / 2) / MILLIS_PER_MINUTE;
    let (hours, minutes) = (total_minutes / 60, total_minutes % 60);

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
