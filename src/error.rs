//! Error types for Fitflat

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during conversion
///
/// Every variant is fatal for the batch: either the full run completes and one
/// CSV is written, or the process stops before producing output.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Unreadable timestamp: {0}")]
    Timestamp(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}
