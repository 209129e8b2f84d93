//! CRUD operations on remote resources.

use crate::error::Result;
use crate::transport::Transport;
use crate::types::Session;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Resource types managed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Job,
    Profile,
    Download,
    Video,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Job,
        Resource::Profile,
        Resource::Download,
        Resource::Video,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Job => "job",
            Resource::Profile => "profile",
            Resource::Download => "download",
            Resource::Video => "video",
        }
    }

    /// Collection path, e.g. `/video`.
    pub fn path(&self) -> String {
        format!("/{}", self.name())
    }

    /// Member path, e.g. `/video/54000`.
    pub fn member_path(&self, id: &str) -> String {
        format!("/{}/{}", self.name(), id)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operations on one resource type, on behalf of one session.
pub struct ResourceClient<'a> {
    transport: &'a Transport,
    session: &'a Session,
    resource: Resource,
}

impl<'a> ResourceClient<'a> {
    pub(crate) fn new(transport: &'a Transport, session: &'a Session, resource: Resource) -> Self {
        Self {
            transport,
            session,
            resource,
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// List every record.
    pub async fn find_all(&self) -> Result<Value> {
        debug!(resource = %self.resource, "Listing records");
        self.transport
            .get(&self.resource.path(), Some(self.session))
            .await?
            .xml()
    }

    /// Fetch one record.
    pub async fn find(&self, id: &str) -> Result<Value> {
        debug!(resource = %self.resource, id = %id, "Fetching record");
        self.transport
            .get(&self.resource.member_path(id), Some(self.session))
            .await?
            .xml()
    }

    /// Create a record and return it as the service echoes it back.
    pub async fn create(&self, attributes: &[(&str, &str)]) -> Result<Value> {
        debug!(resource = %self.resource, "Creating record");
        self.transport
            .post(&self.resource.path(), attributes, Some(self.session))
            .await?
            .xml()
    }

    pub async fn update(&self, id: &str, attributes: &[(&str, &str)]) -> Result<bool> {
        debug!(resource = %self.resource, id = %id, "Updating record");
        self.transport
            .put(&self.resource.member_path(id), attributes, Some(self.session))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        debug!(resource = %self.resource, id = %id, "Deleting record");
        self.transport
            .delete(&self.resource.member_path(id), Some(self.session))
            .await
    }

    /// Upload a file as a new record.
    ///
    /// `attributes` must not contain `file`; the path is passed separately.
    pub async fn upload(&self, file: &str, attributes: &[(&str, &str)]) -> Result<Value> {
        debug!(resource = %self.resource, file = %file, "Uploading file");
        let mut form = Vec::with_capacity(attributes.len() + 1);
        form.push(("file", file));
        form.extend_from_slice(attributes);

        self.transport
            .post_multipart(
                &format!("{}/upload", self.resource.path()),
                &form,
                Some(self.session),
            )
            .await?
            .xml()
    }
}
