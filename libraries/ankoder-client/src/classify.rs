//! Mapping of response status codes to errors.

use crate::error::{AnkoderError, Result};
use crate::xml;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::warn;

/// Check a completed response.
///
/// | Status | Outcome |
/// |---|---|
/// | 2xx | `Ok(())` |
/// | 400 | [`AnkoderError::BadRequest`] with the parsed body |
/// | 401 | [`AnkoderError::NotAuthorized`] with the status text |
/// | 404 | [`AnkoderError::ResourceNotFound`] with the status text |
/// | 422 | [`AnkoderError::UnprocessableEntity`] with the parsed body, pretty-printed, or the raw text |
/// | 500 | [`AnkoderError::ServerError`] with the status text |
///
/// Any other status also passes as `Ok(())`. Callers must not assume every
/// failed request produces an error.
pub fn classify(status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    let message = status.canonical_reason().unwrap_or_default().to_string();

    let error = match status.as_u16() {
        400 => AnkoderError::BadRequest(detail(body)),
        401 => AnkoderError::NotAuthorized(message),
        404 => AnkoderError::ResourceNotFound(message),
        422 => AnkoderError::UnprocessableEntity(display(detail(body), body)),
        500 => AnkoderError::ServerError(message),
        code => {
            warn!(status = code, "Unmapped status, treating response as success");
            return Ok(());
        }
    };

    warn!(status = status.as_u16(), error = %error, "Request failed");
    Err(error)
}

/// Text form of a parsed body: strings as-is, structures pretty-printed.
fn display(detail: Value, body: &str) -> String {
    match detail {
        Value::String(text) => text,
        other => serde_json::to_string_pretty(&other).unwrap_or_else(|_| body.to_string()),
    }
}

/// Parsed XML body, or the raw text when it is not XML.
fn detail(body: &str) -> Value {
    xml::parse(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
