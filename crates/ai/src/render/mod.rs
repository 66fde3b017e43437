//! Response rendering.
//!
//! One module per data kind. Each exposes a `markdown` renderer over the
//! lenient typed models and a `json` renderer that passes the provider's raw
//! records through inside a small envelope (count plus an echo of the request
//! parameters). Both return output already held to the character budget.

pub mod book_ticker;
pub mod exchange_info;
pub mod format;
pub mod klines;
pub mod order_book;
pub mod price;
pub mod symbols;
pub mod ticker;
pub mod trades;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ToolError;
use crate::truncation::JsonTruncation;

/// Treat a payload as a record list: arrays as-is, a lone object as a list of
/// one (single-symbol responses come back unwrapped).
pub fn record_list(payload: Value) -> Result<Vec<Value>, ToolError> {
    match payload {
        Value::Array(items) => Ok(items),
        Value::Object(_) => Ok(vec![payload]),
        other => Err(ToolError::rendering(format!(
            "expected a list of records, got {}",
            json_type(&other)
        ))),
    }
}

/// Require an array payload.
pub fn array(payload: Value, what: &str) -> Result<Vec<Value>, ToolError> {
    match payload {
        Value::Array(items) => Ok(items),
        other => Err(ToolError::rendering(format!(
            "expected {what} as an array, got {}",
            json_type(&other)
        ))),
    }
}

/// Require an object payload.
pub fn object(payload: &Value, what: &str) -> Result<(), ToolError> {
    if payload.is_object() {
        Ok(())
    } else {
        Err(ToolError::rendering(format!(
            "expected {what} as an object, got {}",
            json_type(payload)
        )))
    }
}

/// Typed views over raw records.
pub fn typed<T: DeserializeOwned>(records: &[Value]) -> Result<Vec<T>, ToolError> {
    records
        .iter()
        .map(|record| T::deserialize(record).map_err(ToolError::from))
        .collect()
}

/// Pretty-printed JSON (2-space indent).
pub fn pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Pretty-print a structured envelope, merging truncation metadata into the
/// top-level object when records were dropped.
pub fn envelope(mut doc: Value, note: Option<JsonTruncation>) -> Result<String, serde_json::Error> {
    if let (Some(note), Value::Object(fields)) = (note, &mut doc) {
        if let Value::Object(extra) = serde_json::to_value(note)? {
            fields.extend(extra);
        }
    }
    pretty(&doc)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
