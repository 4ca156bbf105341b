//! Interpretation of the image host's JSON reply.
//!
//! Expected shapes:
//!
//! ```text
//! {"success": true,  "data":  {"url": "https://i.ibb.co/..."}}
//! {"success": false, "error": {"message": "Invalid API v1 key."}}
//! ```
//!
//! `success` and `data.url` are read with JSON-falsy semantics: `false`,
//! `null`, absent, `0`, `""`, `[]` and `{}` all count as false.

use serde_json::Value;

use crate::error::RelayError;

/// Remote message used when a failure reply carries none.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Upload failed. Please try again.";

/// Extract the hosted URL from a reply, or the matching [`RelayError`].
pub fn parse_upload_response(payload: &Value) -> Result<String, RelayError> {
    if !is_truthy(payload.get("success")) {
        let message = payload
            .get("error")
            .and_then(|error| error.get("message"))
            .filter(|message| !message.is_null())
            .map(|message| match message {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string());
        return Err(RelayError::Rejected { message });
    }

    payload
        .get("data")
        .and_then(|data| data.get("url"))
        .filter(|url| is_truthy(Some(url)))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(RelayError::MissingUrl)
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}
