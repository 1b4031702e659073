//! Fitflat - flatten binary FIT activity files into a single CSV
//!
//! Fitflat walks a directory of `.fit` files, decodes each one through the
//! external FIT decoder, reduces the decoded messages to four tracked fields
//! (timestamp, heart rate, activity type, and the carried-forward
//! activity-type timestamp) with a forward-fill policy, and writes the
//! accumulated rows as one CSV.
//!
//! ## Pipeline
//!
//! directory walk → FIT decode → timestamp normalization + flattening →
//! in-memory table → CSV write

pub mod decoder;
pub mod error;
pub mod flatten;
pub mod normalizer;
pub mod pipeline;
pub mod types;
pub mod walker;
pub mod writer;

pub use decoder::{DecodedField, DecodedMessage, FieldValue, FitSource, RecordSource};
pub use error::ConvertError;
pub use normalizer::TimestampNormalizer;
pub use pipeline::{ConvertOptions, Converter};
pub use types::{FlatRecord, OutputTable, RunState, TRACKED_FIELDS};

/// Fitflat version reported by the CLI
pub const FITFLAT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Display time zone used unless overridden on the command line
pub const DEFAULT_TIMEZONE: &str = "US/Eastern";
