//! HTTP transport for the Ankoder API.

use crate::classify::classify;
use crate::error::{AnkoderError, Result};
use crate::headers::build_headers;
use crate::types::{Credentials, Endpoint, Method, Session};
use crate::xml;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Response format requested from the service.
pub const OUT_FORMAT: &str = "xml";

/// Boundary used for every multipart body.
pub const MULTIPART_BOUNDARY: &str = "349832898984244898448024464570528145";

/// Name of the multipart part carrying the uploaded file.
const FILE_PART: &str = "data";

/// Attribute holding the path of the file to upload.
const FILE_ATTRIBUTE: &str = "file";

/// A response that passed status classification.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    /// Parse the body as XML.
    pub fn xml(&self) -> Result<serde_json::Value> {
        xml::parse(&self.body)
    }
}

/// Issues requests against the API.
///
/// Every request is signed when the credentials allow it, and every
/// response goes through [`classify`] before it is returned.
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl Transport {
    pub fn new(endpoint: &Endpoint, credentials: Credentials) -> Result<Self> {
        if endpoint.host.is_empty() {
            return Err(AnkoderError::InvalidUrl("host cannot be empty".into()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            http,
            base_url: endpoint.base_url(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// GET `path`, adding the `.xml` suffix when the path has none.
    pub async fn get(&self, path: &str, session: Option<&Session>) -> Result<ApiResponse> {
        let path = with_format(path);
        let request = self.http.get(self.url(&path));
        self.execute(request, Method::Get, &path, session).await
    }

    /// POST `query` as a form, plus `format=xml`.
    pub async fn post(
        &self,
        path: &str,
        query: &[(&str, &str)],
        session: Option<&Session>,
    ) -> Result<ApiResponse> {
        let request = self.http.post(self.url(path)).form(&with_format_field(query));
        self.execute(request, Method::Post, path, session).await
    }

    /// PUT `query` as a form, plus `format=xml`. The body is discarded.
    pub async fn put(
        &self,
        path: &str,
        query: &[(&str, &str)],
        session: Option<&Session>,
    ) -> Result<bool> {
        let request = self.http.put(self.url(path)).form(&with_format_field(query));
        self.execute(request, Method::Put, path, session).await?;
        Ok(true)
    }

    /// DELETE `path`, adding the `.xml` suffix when the path has none.
    pub async fn delete(&self, path: &str, session: Option<&Session>) -> Result<bool> {
        let path = with_format(path);
        let request = self.http.delete(self.url(&path));
        self.execute(request, Method::Delete, &path, session).await?;
        Ok(true)
    }

    /// POST a multipart form built from `attributes`.
    ///
    /// The `file` attribute names a file on disk, sent as the `data` part.
    /// Every other attribute becomes a text part.
    pub async fn post_multipart(
        &self,
        path: &str,
        attributes: &[(&str, &str)],
        session: Option<&Session>,
    ) -> Result<ApiResponse> {
        let file_path = attributes
            .iter()
            .find(|(key, _)| *key == FILE_ATTRIBUTE)
            .map(|(_, value)| Path::new(*value))
            .ok_or(AnkoderError::MissingFile)?;
        let fields: Vec<(&str, &str)> = attributes
            .iter()
            .filter(|(key, _)| *key != FILE_ATTRIBUTE)
            .copied()
            .collect();

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let contents = tokio::fs::read(file_path).await?;

        debug!(file = %file_path.display(), size = contents.len(), "Building multipart body");

        let body = multipart_body(&file_name, &contents, &fields);
        let content_type = HeaderValue::from_str(&format!(
            "multipart/form-data; boundary={}",
            MULTIPART_BOUNDARY
        ))
        .map_err(|e| AnkoderError::InvalidHeader(e.to_string()))?;

        let request = self
            .http
            .post(self.url(path))
            .header(CONTENT_TYPE, content_type)
            .body(body);
        self.execute(request, Method::Post, path, session).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        method: Method,
        path: &str,
        session: Option<&Session>,
    ) -> Result<ApiResponse> {
        let headers = build_headers(session, Some(&self.credentials), method, path)?;

        debug!(
            method = %method,
            path = %path,
            signed = self.credentials.can_sign(),
            "Sending request"
        );

        let response = request.headers(headers).send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        debug!(method = %method, path = %path, status = status.as_u16(), "Received response");

        classify(status, &body)?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

/// Append `.xml` to a path whose last segment has no extension.
///
/// Any query string is left after the suffix.
pub fn with_format(path: &str) -> String {
    let (resource, query) = match path.split_once('?') {
        Some((resource, query)) => (resource, Some(query)),
        None => (path, None),
    };

    let mut formatted = if resource.contains('.') {
        resource.to_string()
    } else {
        format!("{}.{}", resource, OUT_FORMAT)
    };

    if let Some(query) = query {
        formatted.push('?');
        formatted.push_str(query);
    }
    formatted
}

fn with_format_field<'a>(query: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
    let mut form = query.to_vec();
    form.push(("format", OUT_FORMAT));
    form
}

/// Build a multipart/form-data body with [`MULTIPART_BOUNDARY`].
pub fn multipart_body(file_name: &str, contents: &[u8], fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::with_capacity(contents.len() + 256);

    body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
             Content-Transfer-Encoding: binary\r\n\
             Content-Type: application/octet-stream\r\n\
             \r\n",
            urlencoding::encode(FILE_PART),
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(b"\r\n");

    for (key, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                urlencoding::encode(key),
                value
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_format() {
        assert_eq!(with_format("/video"), "/video.xml");
        assert_eq!(with_format("/video/54000"), "/video/54000.xml");
        assert_eq!(with_format("/video.json"), "/video.json");
        assert_eq!(with_format("/video.xml"), "/video.xml");
        assert_eq!(with_format("/video?page=2"), "/video.xml?page=2");
    }

    #[test]
    fn test_format_field_appended_last() {
        let form = with_format_field(&[("name", "clip"), ("width", "320")]);
        assert_eq!(form, vec![("name", "clip"), ("width", "320"), ("format", "xml")]);
    }

    #[test]
    fn test_multipart_body_layout() {
        let body = multipart_body("a.bin", b"\x00\x01binary", &[("title", "t")]);
        let parts: [&[u8]; 11] = [
            b"--349832898984244898448024464570528145\r\n",
            b"Content-Disposition: form-data; name=\"data\"; filename=\"a.bin\"\r\n",
            b"Content-Transfer-Encoding: binary\r\n",
            b"Content-Type: application/octet-stream\r\n",
            b"\r\n",
            b"\x00\x01binary\r\n",
            b"--349832898984244898448024464570528145\r\n",
            b"Content-Disposition: form-data; name=\"title\"\r\n",
            b"\r\n",
            b"t\r\n",
            b"--349832898984244898448024464570528145--\r\n",
        ];
        let expected = parts.concat();

        assert_eq!(body, expected);
    }

    #[test]
    fn test_multipart_body_without_fields() {
        let body = String::from_utf8(multipart_body("clip.avi", b"abc", &[])).unwrap();

        assert_eq!(body.matches("Content-Disposition").count(), 1);
        assert!(body.ends_with("\r\n--349832898984244898448024464570528145--\r\n"));
    }

    #[test]
    fn test_multipart_field_names_are_escaped() {
        let body = String::from_utf8(multipart_body("a.bin", b"", &[("video title", "x")])).unwrap();
        assert!(body.contains("name=\"video%20title\""));
    }

    #[test]
    fn test_empty_host_rejected() {
        let result = Transport::new(&Endpoint::new("", 80), Credentials::default());
        assert!(matches!(result, Err(AnkoderError::InvalidUrl(_))));
    }
}
