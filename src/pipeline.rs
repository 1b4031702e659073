//! Pipeline orchestration
//!
//! Ties the walker, decoder, flattener, and writer together. Files are
//! processed strictly one at a time in discovery order; every file gets a
//! fresh forward-fill state; the full table is accumulated in memory and
//! written once at the end.

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::decoder::{FitSource, RecordSource};
use crate::error::ConvertError;
use crate::flatten::flatten_messages;
use crate::normalizer::TimestampNormalizer;
use crate::types::OutputTable;
use crate::walker::discover;
use crate::writer::write_csv;
use crate::DEFAULT_TIMEZONE;

/// Configuration for one conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory holding the `.fit` inputs
    pub input_directory: PathBuf,
    /// Destination CSV path
    pub output_file: PathBuf,
    /// IANA zone name for display timestamps
    pub timezone: String,
    /// Descend one level into immediate subdirectories
    pub recursive: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            input_directory: PathBuf::from("."),
            output_file: PathBuf::from("out.csv"),
            timezone: DEFAULT_TIMEZONE.to_string(),
            recursive: false,
        }
    }
}

/// Batch converter driving the per-file pipeline
pub struct Converter {
    normalizer: TimestampNormalizer,
    source: Box<dyn RecordSource>,
}

impl Converter {
    /// Create a converter reading real FIT files
    pub fn new(normalizer: TimestampNormalizer) -> Self {
        Self::with_source(normalizer, Box::new(FitSource))
    }

    /// Create a converter with a custom record source
    pub fn with_source(normalizer: TimestampNormalizer, source: Box<dyn RecordSource>) -> Self {
        Self { normalizer, source }
    }

    /// Flatten every discovered file under `root` into one table.
    ///
    /// Any decode failure aborts the whole batch.
    pub fn convert_directory(
        &self,
        root: &Path,
        recursive: bool,
    ) -> Result<OutputTable, ConvertError> {
        info!("processing {}", root.display());

        let mut table = OutputTable::default();
        for path in discover(root, recursive)? {
            self.convert_file(&path, &mut table)?;
        }

        Ok(table)
    }

    /// Flatten one file into `table` with a fresh forward-fill state
    pub fn convert_file(&self, path: &Path, table: &mut OutputTable) -> Result<(), ConvertError> {
        info!("converting {}", path.display());

        let messages = self.source.open(path)?;
        let before = table.len();
        flatten_messages(&messages, &self.normalizer, table)?;
        debug!(
            "{}: {} messages, {} records",
            path.display(),
            messages.len(),
            table.len() - before
        );

        Ok(())
    }
}

/// Run a full conversion: discover, flatten, write the CSV.
///
/// Returns the number of records written.
pub fn run(options: &ConvertOptions) -> Result<usize, ConvertError> {
    let normalizer = TimestampNormalizer::from_name(&options.timezone)?;
    let converter = Converter::new(normalizer);

    let table = converter.convert_directory(&options.input_directory, options.recursive)?;
    write_csv(&options.output_file, &table)?;

    info!(
        "finished conversions: {} records -> {}",
        table.len(),
        options.output_file.display()
    );
    Ok(table.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{DecodedField, DecodedMessage, FieldValue};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::fs::File;
    use tempfile::tempdir;

    /// In-memory record source keyed by file name
    struct StubSource {
        by_name: HashMap<String, Vec<DecodedMessage>>,
    }

    impl RecordSource for StubSource {
        fn open(&self, path: &Path) -> Result<Vec<DecodedMessage>, ConvertError> {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            Ok(self.by_name.get(&name).cloned().unwrap_or_default())
        }
    }

    fn msg(fields: Vec<(&str, FieldValue)>) -> DecodedMessage {
        DecodedMessage::new(
            fields
                .into_iter()
                .map(|(name, value)| DecodedField {
                    name: name.to_string(),
                    value,
                })
                .collect(),
        )
    }

    fn converter(by_name: HashMap<String, Vec<DecodedMessage>>) -> Converter {
        let normalizer = TimestampNormalizer::from_name("US/Eastern").unwrap();
        Converter::with_source(normalizer, Box::new(StubSource { by_name }))
    }

    #[test]
    fn test_records_follow_file_then_message_order() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.fit")).unwrap();
        File::create(dir.path().join("b.fit")).unwrap();

        let mut by_name = HashMap::new();
        by_name.insert(
            "a.fit".to_string(),
            vec![
                msg(vec![("heart_rate", FieldValue::Integer(100))]),
                msg(vec![("heart_rate", FieldValue::Integer(101))]),
            ],
        );
        by_name.insert(
            "b.fit".to_string(),
            vec![msg(vec![("heart_rate", FieldValue::Integer(102))])],
        );

        let table = converter(by_name)
            .convert_directory(dir.path(), false)
            .unwrap();
        let rates: Vec<i64> = table.records.iter().filter_map(|r| r.heart_rate).collect();
        assert_eq!(rates, [100, 101, 102]);
    }

    #[test]
    fn test_forward_fill_state_resets_between_files() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.fit")).unwrap();
        File::create(dir.path().join("b.fit")).unwrap();

        let t1 = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let mut by_name = HashMap::new();
        by_name.insert(
            "a.fit".to_string(),
            vec![msg(vec![("timestamp", FieldValue::Timestamp(t1))])],
        );
        by_name.insert(
            "b.fit".to_string(),
            vec![msg(vec![("heart_rate", FieldValue::Integer(90))])],
        );

        let table = converter(by_name)
            .convert_directory(dir.path(), false)
            .unwrap();
        assert_eq!(table.records.len(), 1);
        // b.fit must not inherit a.fit's timestamp
        assert_eq!(table.records[0].timestamp, None);
    }

    #[test]
    fn test_empty_directory_yields_empty_table() {
        let dir = tempdir().unwrap();
        let table = converter(HashMap::new())
            .convert_directory(dir.path(), false)
            .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_run_rejects_unknown_timezone() {
        let options = ConvertOptions {
            timezone: "Not/A_Zone".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            run(&options),
            Err(ConvertError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_run_writes_header_for_empty_input() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.csv");

        let options = ConvertOptions {
            input_directory: dir.path().to_path_buf(),
            output_file: out.clone(),
            ..Default::default()
        };

        let written = run(&options).unwrap();
        assert_eq!(written, 0);
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "timestamp,heart_rate,activity_type,activity_type_last_timestamp\n"
        );
    }
}
