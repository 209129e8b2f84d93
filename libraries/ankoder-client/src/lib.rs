//! Ankoder Client
//!
//! HTTP client library for the Ankoder video encoding service.
//!
//! # Features
//!
//! - **Sessions**: login handshake, session recovery and local destruction
//! - **Signing**: per-request HMAC passkeys from the account's private key
//! - **Resources**: CRUD on jobs, profiles, downloads and videos
//! - **Uploads**: single-shot multipart uploads
//! - **Errors**: status codes mapped to typed errors
//!
//! # Example
//!
//! ```ignore
//! use ankoder_client::{AnkoderClient, AnkoderError, Credentials, Endpoint};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::signing("access_key", "private_key");
//!     let client = AnkoderClient::new(Endpoint::default(), credentials)?;
//!
//!     let session = client.login("user", "password").await?;
//!
//!     match client.videos(&session).find("54000").await {
//!         Ok(video) => println!("{}", video["name"]),
//!         Err(AnkoderError::ResourceNotFound(_)) => println!("no such video"),
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod classify;
mod client;
mod error;
mod headers;
mod resource;
mod session;
mod settings;
mod signer;
mod transport;
mod types;
mod urls;
pub mod xml;

// Re-export main types
pub use client::AnkoderClient;
pub use error::{AnkoderError, ErrorKind, Result};
pub use resource::{Resource, ResourceClient};
pub use session::{SessionManager, SessionRegistry, LOGIN_PATH};
pub use settings::AnkoderSettings;
pub use transport::{ApiResponse, Transport, MULTIPART_BOUNDARY, OUT_FORMAT};
pub use types::{Credentials, Endpoint, Method, Session, DEFAULT_HOST, DEFAULT_PORT};

// Building blocks, for callers assembling their own requests
pub use classify::classify;
pub use headers::{build_headers, build_headers_at, user_agent};
pub use signer::{http_date, sign};
pub use transport::{multipart_body, with_format};
pub use urls::{sanitize_url, url_exists, url_exists_within, MAX_REQUESTS};
