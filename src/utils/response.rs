use serde::Deserialize;
use serde_json::Value;

/// Error body the backend sends on failed requests: `{ "detail": ... }`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub detail: Option<Value>,
}

/// Pulls the `detail` message out of an error body, if there is one.
///
/// String details are returned as-is (blank ones count as absent); structured details (validation error
/// arrays) are returned as compact JSON.
pub fn extract_detail(raw: &str) -> Option<String> {
    let body: ApiErrorBody = serde_json::from_str(raw).ok()?;
    match body.detail? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// Message for a failed write: the `detail` field, else the raw body text.
pub fn write_failure_message(raw: &str) -> String {
    extract_detail(raw).unwrap_or_else(|| raw.to_string())
}
