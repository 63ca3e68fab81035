//! Response normalization shared by every API call.
//!
//! Bodies are decoded as JSON when the declared content type says JSON and
//! captured as text otherwise; decode failures become `Value::Null` instead
//! of errors. Failed statuses are turned into `ApiError::Request` with a
//! message derived from the payload.

use reqwest::{Response, StatusCode, header};
use serde_json::Value;

use crate::error::ApiError;

/// Decode a response body into a status + payload pair.
pub(super) async fn decode_payload(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let is_json = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));

    let payload = if is_json {
        resp.json::<Value>().await.unwrap_or(Value::Null)
    } else {
        match resp.text().await {
            Ok(text) => Value::String(text),
            Err(_) => Value::Null,
        }
    };
    (status, payload)
}

/// Derive the user-facing message for a failed response.
///
/// Priority: structured `detail`, structured `message`, the stringified
/// payload, then a generic fallback. Empty strings are skipped so a blank
/// body still yields the generic message.
pub(super) fn error_message(status: u16, payload: &Value) -> String {
    if let Some(detail) = payload
        .get("detail")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    {
        return detail.to_string();
    }
    if let Some(message) = payload
        .get("message")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    {
        return message.to_string();
    }
    match payload {
        Value::Null => {}
        Value::String(s) if s.is_empty() => {}
        other => return other.to_string(),
    }
    format!("Request failed ({status})")
}

/// Turn a raw response into the normalized payload, or an `ApiError::Request`
/// carrying status, payload, and derived message.
pub(super) async fn into_result(resp: Response) -> Result<Value, ApiError> {
    let (status, payload) = decode_payload(resp).await;
    if status.is_success() {
        Ok(payload)
    } else {
        let message = error_message(status.as_u16(), &payload);
        Err(ApiError::Request {
            status: status.as_u16(),
            payload,
            message,
        })
    }
}

/// Deserialize a normalized payload into a typed model.
pub(super) fn typed<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Transport(format!("decode response: {e}")))
}
