//! Main Ankoder client.

use crate::error::Result;
use crate::resource::{Resource, ResourceClient};
use crate::session::{SessionManager, SessionRegistry};
use crate::settings::AnkoderSettings;
use crate::transport::Transport;
use crate::types::{Credentials, Endpoint, Session};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Main client for the Ankoder video encoding service.
///
/// The client owns the transport and the session registry, and hands out
/// per-resource clients bound to a session.
///
/// # Example
///
/// ```ignore
/// use ankoder_client::AnkoderClient;
///
/// let client = AnkoderClient::from_config_file("config/ankoder.yml", "production")?;
/// let session = client.login_with_credentials().await?;
///
/// let videos = client.videos(&session).find_all().await?;
/// client
///     .jobs(&session)
///     .create(&[("original_file_id", "54000"), ("profile_id", "3")])
///     .await?;
///
/// client.destroy(session).await;
/// ```
pub struct AnkoderClient {
    transport: Arc<Transport>,
    sessions: SessionManager,
}

impl AnkoderClient {
    /// Create a client with a fresh session registry.
    pub fn new(endpoint: Endpoint, credentials: Credentials) -> Result<Self> {
        Self::with_registry(endpoint, credentials, Arc::new(SessionRegistry::new()))
    }

    /// Create a client that records sessions in an existing registry.
    pub fn with_registry(
        endpoint: Endpoint,
        credentials: Credentials,
        registry: Arc<SessionRegistry>,
    ) -> Result<Self> {
        let transport = Arc::new(Transport::new(&endpoint, credentials)?);
        info!(url = %transport.base_url(), "Ankoder client ready");

        Ok(Self {
            sessions: SessionManager::new(transport.clone(), registry),
            transport,
        })
    }

    pub fn from_settings(settings: &AnkoderSettings) -> Result<Self> {
        Self::new(settings.endpoint(), settings.credentials())
    }

    /// Load the `environment` section of a config file and build a client.
    pub fn from_config_file(path: impl AsRef<Path>, environment: &str) -> Result<Self> {
        Self::from_settings(&AnkoderSettings::load(path, environment)?)
    }

    /// Low-level transport, for endpoints without a resource wrapper.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        self.sessions.registry()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        self.sessions.login(username, password).await
    }

    /// Log in as the configured `auth_user`.
    pub async fn login_with_credentials(&self) -> Result<Session> {
        self.sessions.login_with_credentials().await
    }

    pub async fn recover(&self, token: impl Into<String>) -> Session {
        self.sessions.recover(token).await
    }

    pub async fn destroy(&self, session: Session) {
        self.sessions.destroy(session).await;
    }

    pub fn resource<'a>(&'a self, resource: Resource, session: &'a Session) -> ResourceClient<'a> {
        ResourceClient::new(&self.transport, session, resource)
    }

    pub fn jobs<'a>(&'a self, session: &'a Session) -> ResourceClient<'a> {
        self.resource(Resource::Job, session)
    }

    pub fn profiles<'a>(&'a self, session: &'a Session) -> ResourceClient<'a> {
        self.resource(Resource::Profile, session)
    }

    pub fn downloads<'a>(&'a self, session: &'a Session) -> ResourceClient<'a> {
        self.resource(Resource::Download, session)
    }

    pub fn videos<'a>(&'a self, session: &'a Session) -> ResourceClient<'a> {
        self.resource(Resource::Video, session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_clients_bind_resource() {
        let client = AnkoderClient::new(Endpoint::default(), Credentials::default()).unwrap();
        let session = Session::new("abc");

        assert_eq!(client.jobs(&session).resource(), Resource::Job);
        assert_eq!(client.profiles(&session).resource(), Resource::Profile);
        assert_eq!(client.downloads(&session).resource(), Resource::Download);
        assert_eq!(client.videos(&session).resource(), Resource::Video);
    }

    #[test]
    fn test_base_url_from_endpoint() {
        let client =
            AnkoderClient::new(Endpoint::new("localhost", 3000), Credentials::default()).unwrap();
        assert_eq!(client.transport().base_url(), "http://localhost:3000");
    }
}
