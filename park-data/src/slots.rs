use std::io::Read;

use park_core::{ParkingSlot, parse_instant};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading parking slots.
#[derive(Debug, Error)]
pub enum SlotLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("invalid occupancy flag '{value}' on row {row}")]
    InvalidFlag { value: String, row: usize },

    #[error("invalid last_occupied_time '{value}' on row {row}")]
    InvalidTimestamp { value: String, row: usize },
}

impl From<csv::Error> for SlotLoaderError {
    fn from(err: csv::Error) -> Self {
        SlotLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the slots CSV file.
///
/// - `id`: numeric slot id
/// - `slot_number`: display label, e.g. `A-01`
/// - `zone`: zone name
/// - `is_occupied`: `true`/`false`, `1`/`0` or `yes`/`no`
/// - `last_occupied_time`: optional date-time, empty when never occupied
#[derive(Debug, Clone, Deserialize, PartialEq)]
struct SlotRecord {
    id: i64,
    slot_number: String,
    zone: String,
    is_occupied: String,
    #[serde(default)]
    last_occupied_time: Option<String>,
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

fn convert_record(
    record: SlotRecord,
    row: usize,
) -> Result<ParkingSlot, SlotLoaderError> {
    let is_occupied = parse_flag(&record.is_occupied).ok_or_else(|| SlotLoaderError::InvalidFlag {
        value: record.is_occupied.clone(),
        row,
    })?;

    let last_occupied_time = match record.last_occupied_time.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_instant(raw).ok_or_else(|| {
            SlotLoaderError::InvalidTimestamp {
                value: raw.to_string(),
                row,
            }
        })?),
    };

    Ok(ParkingSlot {
        id: record.id,
        slot_number: record.slot_number,
        zone: record.zone,
        is_occupied,
        last_occupied_time,
    })
}

/// Loader for parking slot data from CSV files.
pub struct SlotLoader;

impl SlotLoader {
    /// Parse parking slots from a CSV reader, in file order.
    ///
    /// Row numbers in errors are 1-based and do not count the header.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ParkingSlot>, SlotLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let slots = csv_reader
            .deserialize::<SlotRecord>()
            .enumerate()
            .map(|(idx, result)| convert_record(result?, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = slots.len(), "parsed parking slots");
        Ok(slots)
    }
}
