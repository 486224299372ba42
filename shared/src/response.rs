//! API response envelope
//!
//! The API wraps payloads as `{status, data, message?}`, but is not
//! consistent about where lists live: some endpoints nest them under
//! `data`, some under `results`, some return a bare array. Normalization
//! is centralized here with a fixed fallback order so the rest of the
//! system only ever sees one canonical shape.

use serde_json::Value;
use thiserror::Error;

/// Status value the API uses for success.
pub const STATUS_SUCCESS: &str = "success";

/// Envelope-level failures.
#[derive(Debug, Clone, Error)]
pub enum EnvelopeError {
    /// 2xx response whose envelope `status` is not `"success"`
    #[error("{0}")]
    Failed(String),

    /// Payload did not match any known shape
    #[error("Unexpected payload shape: {0}")]
    Shape(String),
}

/// Canonical list shape: items plus a total count.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> ListResult<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }
}

/// Unwrap the `{status, data, message?}` envelope.
///
/// Bodies without a `status` field are treated as bare payloads. A
/// `status` other than `"success"` is a failure carrying the envelope
/// message.
pub fn split_envelope(body: Value) -> Result<Value, EnvelopeError> {
    match body {
        Value::Object(mut map) if map.contains_key("status") => {
            let status = map
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            if status != STATUS_SUCCESS {
                let message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("request failed")
                    .to_string();
                tracing::warn!(status = %status, message = %message, "envelope reported failure");
                return Err(EnvelopeError::Failed(message));
            }
            Ok(map.remove("data").unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}

/// Extract list items and a total count from a payload.
///
/// Fallback order: top-level array → object `data` → object `results` →
/// object `items`. The count comes from `total`/`count` metadata, falling
/// back to the item count. A null payload is an empty list.
pub fn extract_list(payload: &Value) -> Result<(Vec<Value>, u64), EnvelopeError> {
    if payload.is_null() {
        return Ok((Vec::new(), 0));
    }
    if let Some(arr) = payload.as_array() {
        return Ok((arr.clone(), arr.len() as u64));
    }
    let obj = payload
        .as_object()
        .ok_or_else(|| EnvelopeError::Shape(format!("expected a list, got {payload}")))?;
    let items = obj
        .get("data")
        .and_then(Value::as_array)
        .or_else(|| obj.get("results").and_then(Value::as_array))
        .or_else(|| obj.get("items").and_then(Value::as_array))
        .cloned()
        .ok_or_else(|| EnvelopeError::Shape("object payload without a list field".to_string()))?;
    let total = obj
        .get("total")
        .or_else(|| obj.get("count"))
        .and_then(Value::as_u64)
        .unwrap_or(items.len() as u64);
    Ok((items, total))
}
