//! Helpers for URLs handed to the service, e.g. download sources.

use reqwest::header::LOCATION;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Requests [`url_exists`] issues before giving up, the first one included,
/// so at most `MAX_REQUESTS - 1` redirects are followed.
pub const MAX_REQUESTS: usize = 10;

/// Percent-escape everything outside `[a-zA-Z0-9:/.\-+_?=&]`.
///
/// Spaces and literal `+` both come out as `%20`.
pub fn sanitize_url(url: &str) -> String {
    let mut sanitized = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '+' | ' ' => sanitized.push_str("%20"),
            c if c.is_ascii_alphanumeric() || ":/.-_?=&".contains(c) => sanitized.push(c),
            c => {
                let mut buf = [0u8; 4];
                sanitized.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
            }
        }
    }
    sanitized
}

/// Whether `url` answers a GET with 2xx, within [`MAX_REQUESTS`] requests.
///
/// Transport errors, unparsable URLs and non-2xx answers all yield `false`.
pub async fn url_exists(url: &str) -> bool {
    url_exists_within(url, MAX_REQUESTS).await
}

/// [`url_exists`] with an explicit request budget; `limit` counts every
/// request, redirects included.
pub async fn url_exists_within(url: &str, limit: usize) -> bool {
    let client = match Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(30))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            debug!(error = %e, "Failed to build HTTP client");
            return false;
        }
    };

    let mut current = match Url::parse(url) {
        Ok(url) => url,
        Err(e) => {
            debug!(url = %url, error = %e, "Unparsable URL");
            return false;
        }
    };

    for _ in 0..limit {
        let response = match client.get(current.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url = %current, error = %e, "Existence check failed");
                return false;
            }
        };

        let status = response.status();
        if status.is_success() {
            return true;
        }
        if !status.is_redirection() {
            debug!(url = %current, status = status.as_u16(), "Existence check rejected");
            return false;
        }

        let next = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|location| current.join(location).ok());

        match next {
            Some(next) => {
                debug!(from = %current, to = %next, "Following redirect");
                current = next;
            }
            None => return false,
        }
    }

    debug!(url = %url, limit, "Request budget exhausted");
    false
}
