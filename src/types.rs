//! Core types for the Fitflat pipeline
//!
//! This module defines the data that flows through the converter: the tracked
//! field set, the flat output record, the per-file forward-fill state, and the
//! accumulated output table.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

/// The four tracked field names, in header order.
///
/// This order is used for the CSV header row and every data row; it is stable
/// within a run and across runs.
pub const TRACKED_FIELDS: [&str; 4] = [
    "timestamp",
    "heart_rate",
    "activity_type",
    "activity_type_last_timestamp",
];

/// Display format for zone-adjusted timestamps (e.g. `2024-01-15 07:30:00-05:00`)
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// One output row: selected fields from a single decoded message plus
/// carried-forward context.
///
/// Absent fields serialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlatRecord {
    /// Zone-adjusted message timestamp, backfilled from earlier messages when
    /// the emitting message has none
    pub timestamp: Option<DateTime<Tz>>,
    /// Heart rate in beats per minute (always > 0 when present)
    pub heart_rate: Option<i64>,
    /// Raw activity-type label as reported by the decoder
    pub activity_type: Option<String>,
    /// Timestamp in effect at the most recent activity-type message
    pub activity_type_last_timestamp: Option<DateTime<Tz>>,
}

impl FlatRecord {
    /// Display strings for this record in [`TRACKED_FIELDS`] order
    pub fn display_values(&self) -> [String; 4] {
        [
            self.timestamp.map(format_timestamp).unwrap_or_default(),
            self.heart_rate
                .map(|hr| hr.to_string())
                .unwrap_or_default(),
            self.activity_type.clone().unwrap_or_default(),
            self.activity_type_last_timestamp
                .map(format_timestamp)
                .unwrap_or_default(),
        ]
    }
}

/// Render a zone-adjusted timestamp in its CSV display form
pub fn format_timestamp(ts: DateTime<Tz>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Forward-fill state for one input file.
///
/// A fresh value is created at every file boundary; nothing carries across
/// files.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    /// Most recent timestamp observed in any message so far in this file
    pub last_timestamp: Option<DateTime<Tz>>,
    /// Timestamp in effect at the most recent activity-type message
    pub last_activity_type_timestamp: Option<DateTime<Tz>>,
}

/// Ordered collection of flat records accumulated across all input files
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutputTable {
    pub records: Vec<FlatRecord>,
}

impl OutputTable {
    pub fn push(&mut self, record: FlatRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
