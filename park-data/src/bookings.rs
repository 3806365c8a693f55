use std::cmp::Reverse;
use std::io::Read;

use chrono::{DateTime, Utc};
use park_core::{Booking, BookingId, parse_instant};
use serde::Deserialize;
use thiserror::Error;

/// Number of bookings the history view shows by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Errors that can occur when loading booking history.
#[derive(Debug, Error)]
pub enum BookingLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("invalid {column} '{value}' on row {row}")]
    InvalidTimestamp {
        column: &'static str,
        value: String,
        row: usize,
    },
}

impl From<csv::Error> for BookingLoaderError {
    fn from(err: csv::Error) -> Self {
        BookingLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the booking history CSV file.
///
/// - `id`: booking id, as used in the checkout route
/// - `slot_id`: id of the booked slot
/// - `user_name`: who booked
/// - `start_time`: date-time the session started
/// - `end_time`: date-time it ended, empty while still active
#[derive(Debug, Clone, Deserialize, PartialEq)]
struct BookingRecord {
    id: i64,
    slot_id: i64,
    user_name: String,
    start_time: String,
    #[serde(default)]
    end_time: Option<String>,
}

fn parse_time(
    column: &'static str,
    value: &str,
    row: usize,
) -> Result<DateTime<Utc>, BookingLoaderError> {
    parse_instant(value).ok_or_else(|| BookingLoaderError::InvalidTimestamp {
        column,
        value: value.to_string(),
        row,
    })
}

fn convert_record(
    record: BookingRecord,
    row: usize,
) -> Result<Booking, BookingLoaderError> {
    let start_time = parse_time("start_time", &record.start_time, row)?;
    let end_time = match record.end_time.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_time("end_time", raw, row)?),
    };

    Ok(Booking {
        id: BookingId(record.id),
        slot_id: record.slot_id,
        user_name: record.user_name,
        start_time,
        end_time,
    })
}

/// Loader for booking history from CSV files.
pub struct BookingLoader;

impl BookingLoader {
    /// Parse bookings from a CSV reader, in file order.
    ///
    /// Row numbers in errors are 1-based and do not count the header.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<Booking>, BookingLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let bookings = csv_reader
            .deserialize::<BookingRecord>()
            .enumerate()
            .map(|(idx, result)| convert_record(result?, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = bookings.len(), "parsed bookings");
        Ok(bookings)
    }
}

/// Most recent bookings first, at most `limit` of them.
///
/// Bookings that started at the same instant keep their input order.
pub fn recent_bookings(
    mut bookings: Vec<Booking>,
    limit: usize,
) -> Vec<Booking> {
    bookings.sort_by_key(|b| Reverse(b.start_time));
    bookings.truncate(limit);
    bookings
}
