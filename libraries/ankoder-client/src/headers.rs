//! Request headers: session cookie, user agent and signature.

use crate::error::{AnkoderError, Result};
use crate::signer::{http_date, sign};
use crate::types::{Credentials, Method, Session, SESSION_COOKIE};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE, USER_AGENT};

pub const ACCESS_KEY_HEADER: &str = "ankoder_access_key";
pub const DATE_HEADER: &str = "ankoder_date";
pub const PASSKEY_HEADER: &str = "ankoder_passkey";

/// User agent sent with every request.
pub fn user_agent() -> String {
    format!("ankoder-client rust API - {}", env!("CARGO_PKG_VERSION"))
}

/// Build the headers for a request issued now.
pub fn build_headers(
    session: Option<&Session>,
    credentials: Option<&Credentials>,
    method: Method,
    path: &str,
) -> Result<HeaderMap> {
    build_headers_at(session, credentials, method, path, Utc::now())
}

/// Build the headers for a request issued at `now`.
///
/// `now` is formatted once; the same string goes into `ankoder_date` and
/// into the passkey.
pub fn build_headers_at(
    session: Option<&Session>,
    credentials: Option<&Credentials>,
    method: Method,
    path: &str,
    now: DateTime<Utc>,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(session) = session {
        headers.insert(
            COOKIE,
            header_value(&format!("{}={};", SESSION_COOKIE, session.token()))?,
        );
    }

    headers.insert(USER_AGENT, header_value(&user_agent())?);

    if let Some(credentials) = credentials.filter(|c| c.can_sign()) {
        let date = http_date(now);
        let passkey = sign(&credentials.private_key, &date, method.as_str(), path);

        headers.insert(
            HeaderName::from_static(ACCESS_KEY_HEADER),
            header_value(&credentials.access_key)?,
        );
        headers.insert(HeaderName::from_static(DATE_HEADER), header_value(&date)?);
        headers.insert(HeaderName::from_static(PASSKEY_HEADER), header_value(&passkey)?);
    }

    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| AnkoderError::InvalidHeader(format!("{value:?}: {e}")))
}
