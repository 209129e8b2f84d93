//! Request signatures for the Ankoder API.
//!
//! Every signed request carries an `ankoder_passkey` header derived from the
//! account's private key, the request date, the HTTP method and the path.
//! The service recomputes the same value, so the date string used here must
//! be byte-identical to the `ankoder_date` header sent with the request.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::{Digest, Sha1};

type HmacSha1 = Hmac<Sha1>;

/// Number of hex characters of the SHA-1 salt that are fed into the HMAC.
const SALT_LEN: usize = 20;

/// Format a timestamp as an HTTP-date (`Sun, 06 Nov 1994 08:49:37 GMT`).
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Compute the passkey for one request.
///
/// # Arguments
/// * `private_key` - The account's private key
/// * `timestamp` - HTTP-date string, also sent as `ankoder_date`
/// * `method` - Uppercase HTTP method
/// * `path` - Request path as sent on the wire
pub fn sign(private_key: &str, timestamp: &str, method: &str, path: &str) -> String {
    let salt = format!(
        "{:x}",
        Sha1::digest(format!("-{}-{}-{}-", timestamp, method, path).as_bytes())
    );
    let salt = &salt[..SALT_LEN];

    let mut mac = HmacSha1::new_from_slice(private_key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(salt.as_bytes());

    STANDARD
        .encode(mac.finalize().into_bytes())
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const DATE: &str = "Sun, 06 Nov 1994 08:49:37 GMT";

    #[test]
    fn test_http_date_format() {
        let at = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
        assert_eq!(http_date(at), DATE);
    }

    #[test]
    fn test_known_passkeys() {
        assert_eq!(
            sign("secret", DATE, "GET", "/video.xml"),
            "tLtzmIL7PxoS4YJ3MqLTJgTMExY="
        );
        assert_eq!(
            sign("secret", DATE, "POST", "/auth/login"),
            "8cM5eft3roE1YgeE11NP9EsOd98="
        );
    }

    #[test]
    fn test_sign_is_deterministic() {
        let first = sign("key", DATE, "PUT", "/job/1");
        let second = sign("key", DATE, "PUT", "/job/1");
        assert_eq!(first, second);
    }

    #[test]
    fn test_sign_depends_on_every_input() {
        let base = sign("key", DATE, "GET", "/video.xml");
        assert_ne!(base, sign("other", DATE, "GET", "/video.xml"));
        assert_ne!(base, sign("key", "Mon, 07 Nov 1994 08:49:37 GMT", "GET", "/video.xml"));
        assert_ne!(base, sign("key", DATE, "DELETE", "/video.xml"));
        assert_ne!(base, sign("key", DATE, "GET", "/job.xml"));
    }

    #[test]
    fn test_passkey_has_no_trailing_whitespace() {
        let passkey = sign("key", DATE, "GET", "/video.xml");
        assert_eq!(passkey.len(), 28);
        assert_eq!(passkey, passkey.trim_end());
    }
}
