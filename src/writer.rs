//! CSV serialization
//!
//! Writes the accumulated output table in one pass: a header row from the
//! tracked field set, then one row per record in the same field order, with
//! empty strings standing in for absent fields.

use std::path::Path;

use crate::error::ConvertError;
use crate::types::{OutputTable, TRACKED_FIELDS};

/// Write `table` as CSV to `path`, overwriting any existing file
pub fn write_csv(path: &Path, table: &OutputTable) -> Result<(), ConvertError> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(TRACKED_FIELDS)?;
    for record in &table.records {
        writer.write_record(record.display_values())?;
    }

    writer.flush()?;
    Ok(())
}
