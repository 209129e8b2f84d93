//! Types shared across the Ankoder client.

use std::fmt;

/// Default API host when none is configured.
pub const DEFAULT_HOST: &str = "api.ankoder.com";

/// Default API port when none is configured.
pub const DEFAULT_PORT: u16 = 80;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "_ankoderapi_session";

/// Account credentials for the Ankoder service.
///
/// `access_key` and `private_key` sign requests; when either is empty the
/// client sends unsigned requests and relies on the session cookie alone.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub access_key: String,
    pub private_key: String,
    pub auth_user: String,
    pub auth_password: String,
}

impl Credentials {
    /// Credentials used only for signing.
    pub fn signing(access_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            private_key: private_key.into(),
            ..Self::default()
        }
    }

    /// Whether requests made with these credentials carry a passkey.
    pub fn can_sign(&self) -> bool {
        !self.access_key.is_empty() && !self.private_key.is_empty()
    }
}

/// Host and port of the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Base URL requests are issued against (`http://host:port`).
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

/// Session token issued by the service on login.
///
/// The token is opaque; the service alone decides whether it is still valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Session(String);

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// HTTP method of a request, as used for signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_sign_requires_both_keys() {
        assert!(Credentials::signing("access", "private").can_sign());
        assert!(!Credentials::signing("", "private").can_sign());
        assert!(!Credentials::signing("access", "").can_sign());
        assert!(!Credentials::default().can_sign());
    }

    #[test]
    fn test_default_endpoint() {
        let endpoint = Endpoint::default();
        assert_eq!(endpoint.host, "api.ankoder.com");
        assert_eq!(endpoint.port, 80);
        assert_eq!(endpoint.base_url(), "http://api.ankoder.com:80");
    }
}
