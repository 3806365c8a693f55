use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Local date-time layouts accepted from form fields and CSV files.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a user-supplied date-time into an instant.
///
/// Values with an explicit offset (RFC 3339) are converted to UTC. Values
/// without one, as produced by an HTML `datetime-local` input, are read on a
/// fixed UTC wall clock, so two naive values differ by exactly their
/// wall-clock distance. A bare date means midnight. Sub-millisecond digits
/// are dropped.
///
/// Returns `None` for empty or unparseable input.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return truncate_to_millis(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .and_then(|naive| truncate_to_millis(naive.and_utc()))
}

fn truncate_to_millis(instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let nanos = instant.nanosecond();
    instant.with_nanosecond(nanos - nanos % 1_000_000)
}

/// A booking window whose end lies strictly after its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Returns `None` unless `end > start` at millisecond precision.
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Option<Self> {
        let start = truncate_to_millis(start)?;
        let end = truncate_to_millis(end)?;
        (end > start).then_some(Self { start, end })
    }

    /// Parses both ends of the range; `None` if either fails or the range
    /// is empty or reversed.
    pub fn parse(
        start_raw: &str,
        end_raw: &str,
    ) -> Option<Self> {
        let start = parse_instant(start_raw)?;
        let end = parse_instant(end_raw)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Whole milliseconds between start and end.
    pub fn millis(&self) -> i64 {
        self.duration().num_milliseconds()
    }

    /// Elapsed time in (fractional) hours.
    pub fn hours(&self) -> f64 {
        self.millis() as f64 / 3_600_000.0
    }
}
