//! Record decoder seam
//!
//! The FIT binary format is decoded by the external `fitparser` crate; this
//! module wraps it behind a narrow name/value interface so the flattening core
//! never touches decoder internals. Decoded messages expose an explicit
//! optional-field mapping; values arrive already unit-converted by the
//! decoder's profile tables.

use chrono::{DateTime, Utc};
use std::fmt;
use std::fs::File;
use std::path::Path;

use crate::error::ConvertError;

/// A decoded field value, reduced to the shapes the flattener cares about
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Point in time, interpreted as UTC
    Timestamp(DateTime<Utc>),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value, if it has one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            FieldValue::Float(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// Timestamp view of the value, if it is one
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Timestamp(ts) => write!(f, "{}", ts),
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One named field on a decoded message
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField {
    pub name: String,
    pub value: FieldValue,
}

/// One decoded message: an explicit collection of named fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedMessage {
    pub fields: Vec<DecodedField>,
}

impl DecodedMessage {
    pub fn new(fields: Vec<DecodedField>) -> Self {
        Self { fields }
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }
}

/// Source of decoded messages for one input file
pub trait RecordSource {
    /// Decode the file at `path` into its message sequence, in file order
    fn open(&self, path: &Path) -> Result<Vec<DecodedMessage>, ConvertError>;
}

/// [`RecordSource`] backed by the `fitparser` crate
pub struct FitSource;

impl RecordSource for FitSource {
    fn open(&self, path: &Path) -> Result<Vec<DecodedMessage>, ConvertError> {
        let mut file = File::open(path)?;
        let records = fitparser::from_reader(&mut file).map_err(|e| ConvertError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(records
            .iter()
            .map(|record| {
                DecodedMessage::new(
                    record
                        .fields()
                        .iter()
                        .map(|field| DecodedField {
                            name: field.name().to_string(),
                            value: convert_value(field.value()),
                        })
                        .collect(),
                )
            })
            .collect())
    }
}

/// Map a decoder value into the narrow [`FieldValue`] shape.
///
/// Decoder timestamps carry a local offset; the instant is preserved and
/// re-tagged as UTC here so the normalizer sees one uniform input type.
fn convert_value(value: &fitparser::Value) -> FieldValue {
    use fitparser::Value;

    match value {
        Value::Timestamp(ts) => FieldValue::Timestamp(ts.with_timezone(&Utc)),
        Value::Byte(v) => FieldValue::Integer(i64::from(*v)),
        Value::Enum(v) => FieldValue::Integer(i64::from(*v)),
        Value::SInt8(v) => FieldValue::Integer(i64::from(*v)),
        Value::UInt8(v) => FieldValue::Integer(i64::from(*v)),
        Value::UInt8z(v) => FieldValue::Integer(i64::from(*v)),
        Value::SInt16(v) => FieldValue::Integer(i64::from(*v)),
        Value::UInt16(v) => FieldValue::Integer(i64::from(*v)),
        Value::UInt16z(v) => FieldValue::Integer(i64::from(*v)),
        Value::SInt32(v) => FieldValue::Integer(i64::from(*v)),
        Value::UInt32(v) => FieldValue::Integer(i64::from(*v)),
        Value::UInt32z(v) => FieldValue::Integer(i64::from(*v)),
        Value::SInt64(v) => FieldValue::Integer(*v),
        Value::UInt64(v) => FieldValue::Integer(*v as i64),
        Value::UInt64z(v) => FieldValue::Integer(*v as i64),
        Value::Float32(v) => FieldValue::Float(f64::from(*v)),
        Value::Float64(v) => FieldValue::Float(*v),
        Value::String(s) => FieldValue::Text(s.clone()),
        other => FieldValue::Text(other.to_string()),
    }
}
