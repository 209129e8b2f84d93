//! Login handshake and session bookkeeping.

use crate::error::{AnkoderError, Result};
use crate::transport::Transport;
use crate::types::{Session, SESSION_COOKIE};
use regex::Regex;
use reqwest::header::{HeaderMap, SET_COOKIE};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/auth/login";

/// Session tokens known to be active.
///
/// A token is present iff it came from a successful login or an explicit
/// recovery and has not been destroyed since. The registry is never
/// consulted to allow or refuse an operation.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, bool>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, session: &Session) {
        self.sessions
            .write()
            .await
            .insert(session.token().to_string(), true);
    }

    /// Remove a token, returning whether it was present.
    pub async fn remove(&self, session: &Session) -> bool {
        self.sessions.write().await.remove(session.token()).is_some()
    }

    pub async fn contains(&self, token: &str) -> bool {
        self.sessions.read().await.contains_key(token)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Creates, recovers and destroys sessions.
pub struct SessionManager {
    transport: Arc<Transport>,
    registry: Arc<SessionRegistry>,
}

impl SessionManager {
    pub fn new(transport: Arc<Transport>, registry: Arc<SessionRegistry>) -> Self {
        Self {
            transport,
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Log in and register the session issued by the service.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        debug!(username = %username, "Attempting login");

        let response = self
            .transport
            .post(LOGIN_PATH, &[("login", username), ("password", password)], None)
            .await?;

        let session = Session::new(session_token(&response.headers)?);
        self.registry.register(&session).await;

        info!(username = %username, "Login successful");
        Ok(session)
    }

    /// Log in with the `auth_user` and `auth_password` of the transport's
    /// credentials.
    pub async fn login_with_credentials(&self) -> Result<Session> {
        let credentials = self.transport.credentials();
        self.login(&credentials.auth_user, &credentials.auth_password)
            .await
    }

    /// Resume a session from a token obtained earlier.
    ///
    /// The token is neither checked against the registry nor against the
    /// service; an invalid token fails on its first real request.
    pub async fn recover(&self, token: impl Into<String>) -> Session {
        let session = Session::new(token);
        self.registry.register(&session).await;
        debug!("Session recovered");
        session
    }

    /// Forget a session locally. The service is not told.
    pub async fn destroy(&self, session: Session) {
        let removed = self.registry.remove(&session).await;
        info!(known = removed, "Session destroyed");
    }
}

fn session_cookie_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!("(?i){}=([^;]*);", SESSION_COOKIE)).expect("valid session pattern")
    })
}

/// Extract the session token from the `Set-Cookie` headers of a response.
pub fn session_token(headers: &HeaderMap) -> Result<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            session_cookie_pattern()
                .captures(cookie)
                .map(|captures| captures[1].to_string())
        })
        .ok_or_else(|| {
            AnkoderError::SessionTokenParse(format!(
                "no {} cookie in login response",
                SESSION_COOKIE
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn cookies(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(SET_COOKIE, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_token_from_cookie() {
        let headers = cookies(&["_ankoderapi_session=ABC123; path=/"]);
        assert_eq!(session_token(&headers).unwrap(), "ABC123");
    }

    #[test]
    fn test_token_stops_at_first_semicolon() {
        let headers = cookies(&["_ankoderapi_session=ABC123; path=/; HttpOnly"]);
        assert_eq!(session_token(&headers).unwrap(), "ABC123");
    }

    #[test]
    fn test_cookie_name_is_case_insensitive() {
        let headers = cookies(&["_AnkoderAPI_Session=xyz;"]);
        assert_eq!(session_token(&headers).unwrap(), "xyz");
    }

    #[test]
    fn test_token_among_several_cookies() {
        let headers = cookies(&["tracking=1; path=/", "_ankoderapi_session=tok; path=/"]);
        assert_eq!(session_token(&headers).unwrap(), "tok");
    }

    #[test]
    fn test_missing_cookie() {
        let headers = cookies(&["other=1; path=/"]);
        assert!(matches!(
            session_token(&headers),
            Err(AnkoderError::SessionTokenParse(_))
        ));
        assert!(matches!(
            session_token(&HeaderMap::new()),
            Err(AnkoderError::SessionTokenParse(_))
        ));
    }

    #[tokio::test]
    async fn test_registry_lifecycle() {
        let registry = SessionRegistry::new();
        let session = Session::new("ABC123");

        assert!(registry.is_empty().await);
        registry.register(&session).await;
        assert!(registry.contains("ABC123").await);
        assert_eq!(registry.len().await, 1);

        assert!(registry.remove(&session).await);
        assert!(!registry.contains("ABC123").await);
        assert!(!registry.remove(&session).await);
    }
}
