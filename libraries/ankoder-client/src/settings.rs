/// Client configuration
use crate::error::{AnkoderError, Result};
use crate::types::{Credentials, Endpoint, DEFAULT_HOST, DEFAULT_PORT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for one environment of a config file.
///
/// A config file holds one section per environment:
///
/// ```yaml
/// production:
///   access_key: "..."
///   private_key: "..."
///   auth_user: "me"
///   auth_password: "secret"
///   host: api.ankoder.com
///   port: 80
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnkoderSettings {
    #[serde(default)]
    pub access_key: String,

    #[serde(default)]
    pub private_key: String,

    #[serde(default)]
    pub auth_user: String,

    #[serde(default)]
    pub auth_password: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl AnkoderSettings {
    /// Load the `environment` section of a config file.
    ///
    /// The format follows the file extension (YAML, TOML, JSON). Values can
    /// be overridden with `ANKODER_<ENVIRONMENT>__<KEY>` variables, e.g.
    /// `ANKODER_PRODUCTION__HOST`.
    pub fn load(path: impl AsRef<Path>, environment: &str) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AnkoderError::Config(format!(
                "problems trying to load {}: file not found",
                path.display()
            )));
        }

        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.to_path_buf()))
            .add_source(
                ::config::Environment::with_prefix("ANKODER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings
            .get::<Self>(&environment.to_lowercase())
            .map_err(|e| {
                AnkoderError::Config(format!(
                    "problems trying to load {} (environment `{}`): {}",
                    path.display(),
                    environment,
                    e
                ))
            })
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            access_key: self.access_key.clone(),
            private_key: self.private_key.clone(),
            auth_user: self.auth_user.clone(),
            auth_password: self.auth_password.clone(),
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for AnkoderSettings {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            private_key: String::new(),
            auth_user: String::new(),
            auth_password: String::new(),
            host: default_host(),
            port: default_port(),
        }
    }
}
