//! Flattening transformer
//!
//! Reduces one file's decoded message sequence to flat output records. Two
//! pieces of forward-fill state are carried across messages within a file:
//! the last seen timestamp (backfills records whose message has none) and the
//! timestamp in effect at the last activity-type message. State never crosses
//! a file boundary.

use crate::decoder::DecodedMessage;
use crate::error::ConvertError;
use crate::normalizer::TimestampNormalizer;
use crate::types::{FlatRecord, OutputTable, RunState};

/// Flatten one file's messages into `table`, in message order.
///
/// A record is appended only for messages carrying a usable heart rate
/// (strictly positive). Messages carrying neither heart rate nor activity
/// type emit nothing, but their timestamp still advances the forward-fill
/// state.
pub fn flatten_messages(
    messages: &[DecodedMessage],
    normalizer: &TimestampNormalizer,
    table: &mut OutputTable,
) -> Result<(), ConvertError> {
    let mut state = RunState::default();

    for message in messages {
        if message.fields.is_empty() {
            continue;
        }

        let mut record = FlatRecord::default();

        for field in &message.fields {
            match field.name.as_str() {
                "timestamp" => {
                    let utc = field.value.as_timestamp().ok_or_else(|| {
                        ConvertError::Timestamp(format!(
                            "timestamp field holds a non-timestamp value: {}",
                            field.value
                        ))
                    })?;
                    let local = normalizer.normalize(utc);
                    record.timestamp = Some(local);
                    state.last_timestamp = Some(local);
                }
                "heart_rate" => {
                    if let Some(hr) = field.value.as_i64() {
                        if hr > 0 {
                            record.heart_rate = Some(hr);
                        }
                    }
                }
                "activity_type" => {
                    record.activity_type = Some(field.value.to_string());
                }
                _ => {}
            }
        }

        if record.activity_type.is_some() {
            if let Some(ts) = record.timestamp {
                state.last_activity_type_timestamp = Some(ts);
            }
            record.activity_type_last_timestamp = state.last_activity_type_timestamp;
        }

        if record.heart_rate.is_some() {
            if record.timestamp.is_none() {
                record.timestamp = state.last_timestamp;
            }
            table.push(record);
        }
    }

    Ok(())
}
