//! Timestamp normalization
//!
//! Decoded timestamps are UTC instants; this module converts them into the
//! configured display zone. The zone is explicit construction-time state, not
//! a module-level constant, so the converter can run against any IANA zone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::ConvertError;

/// Converts UTC instants into a fixed target time zone
#[derive(Debug, Clone, Copy)]
pub struct TimestampNormalizer {
    zone: Tz,
}

impl TimestampNormalizer {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// Build a normalizer from an IANA zone name (e.g. `US/Eastern`)
    pub fn from_name(name: &str) -> Result<Self, ConvertError> {
        let zone = name
            .parse::<Tz>()
            .map_err(|_| ConvertError::InvalidTimezone(name.to_string()))?;
        Ok(Self::new(zone))
    }

    /// Convert a UTC instant into the target zone
    pub fn normalize(&self, ts: DateTime<Utc>) -> DateTime<Tz> {
        ts.with_timezone(&self.zone)
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }
}
