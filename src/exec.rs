//! Common response handling for async and blocking clients.

use reqwest::StatusCode;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

use crate::error::{ApiError, IamError, MAX_ERROR_BODY_CHARS, Operation, Result, truncate_str};
use crate::request::ApiRequest;

/// Decodes a body into a JSON value with `null` object members removed.
///
/// A member set to `null` decodes as if it were absent, so it takes the
/// field's default like any other missing field.
fn decode_value(text: &str) -> serde_json::Result<Value> {
    let mut value = serde_json::from_str(text)?;
    strip_nulls(&mut value);
    Ok(value)
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, member| !member.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parses a successful response body of any JSON shape (lists, strings).
pub(crate) fn parse_success_response<T: DeserializeOwned>(
    operation: Operation,
    text: &str,
) -> Result<T> {
    decode_value(text)
        .and_then(serde_json::from_value)
        .map_err(|source| IamError::Deserialize { operation, source })
}

/// Parses a successful response body that must be a single JSON object.
///
/// Arrays are rejected even when the target struct could be filled by position.
pub(crate) fn parse_object_response<T: DeserializeOwned>(
    operation: Operation,
    text: &str,
) -> Result<T> {
    let value =
        decode_value(text).map_err(|source| IamError::Deserialize { operation, source })?;
    if !value.is_object() {
        return Err(IamError::Deserialize {
            operation,
            source: serde_json::Error::custom(format!(
                "expected a JSON object, found {}",
                kind(&value)
            )),
        });
    }
    serde_json::from_value(value).map_err(|source| IamError::Deserialize { operation, source })
}

/// Parses an object body that may legitimately be empty (204 responses).
pub(crate) fn parse_optional_response<T: DeserializeOwned>(
    operation: Operation,
    text: &str,
) -> Result<Option<T>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_object_response(operation, text).map(Some)
}

/// Parses an error response body and returns the appropriate [`IamError`].
///
/// Only a JSON object is read as a problem detail; any other body becomes
/// [`IamError::Http`].
pub(crate) fn parse_error_response(operation: Operation, status: StatusCode, text: &str) -> IamError {
    let problem = decode_value(text)
        .ok()
        .filter(Value::is_object)
        .and_then(|value| serde_json::from_value::<ApiError>(value).ok());
    match problem {
        Some(mut error) => {
            error.status_code = status.as_u16();
            IamError::Api { operation, error }
        }
        None => {
            tracing::warn!(
                operation = %operation,
                status = status.as_u16(),
                "error response body is not a problem detail"
            );
            IamError::Http {
                operation,
                status: status.as_u16(),
                body: truncate_str(text, MAX_ERROR_BODY_CHARS).to_string(),
            }
        }
    }
}

/// Checks the response status against the request's expected statuses.
pub(crate) fn check_status(request: &ApiRequest, status: StatusCode, text: &str) -> Result<()> {
    if request.is_expected(status) {
        Ok(())
    } else {
        Err(parse_error_response(request.operation, status, text))
    }
}
