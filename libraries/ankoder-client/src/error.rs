//! Error types for the Ankoder client.

use thiserror::Error;

/// Classification of a failed response, derived from its status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotAuthorized,
    BadRequest,
    UnprocessableEntity,
    ResourceNotFound,
    ServerError,
}

/// Errors that can occur when talking to the Ankoder service.
#[derive(Error, Debug)]
pub enum AnkoderError {
    /// 401 from the service
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// 400 from the service, with the parsed XML body
    #[error("Bad request: {0}")]
    BadRequest(serde_json::Value),

    /// 422 from the service, with the parsed XML body rendered for display
    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    /// 404 from the service
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// 500 from the service
    #[error("Server error: {0}")]
    ServerError(String),

    /// Connection refused, DNS failure, timeout and other transport failures
    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// Login response did not carry a session cookie
    #[error("Failed to parse session token: {0}")]
    SessionTokenParse(String),

    /// Configuration file missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response body is not well-formed XML
    #[error("Failed to parse XML response: {0}")]
    Xml(String),

    /// IO error while reading an upload
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Multipart attributes without a `file` entry
    #[error("Multipart upload requires a `file` attribute")]
    MissingFile,

    /// Header value that cannot be sent over HTTP
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Endpoint that cannot form a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl AnkoderError {
    /// The status classification of this error, if it came from one.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AnkoderError::NotAuthorized(_) => Some(ErrorKind::NotAuthorized),
            AnkoderError::BadRequest(_) => Some(ErrorKind::BadRequest),
            AnkoderError::UnprocessableEntity(_) => Some(ErrorKind::UnprocessableEntity),
            AnkoderError::ResourceNotFound(_) => Some(ErrorKind::ResourceNotFound),
            AnkoderError::ServerError(_) => Some(ErrorKind::ServerError),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for AnkoderError {
    fn from(err: config::ConfigError) -> Self {
        AnkoderError::Config(err.to_string())
    }
}

impl From<quick_xml::Error> for AnkoderError {
    fn from(err: quick_xml::Error) -> Self {
        AnkoderError::Xml(err.to_string())
    }
}

/// Result type for Ankoder client operations.
pub type Result<T> = std::result::Result<T, AnkoderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_for_classified_errors() {
        assert_eq!(
            AnkoderError::NotAuthorized("x".into()).kind(),
            Some(ErrorKind::NotAuthorized)
        );
        assert_eq!(
            AnkoderError::BadRequest(serde_json::Value::Null).kind(),
            Some(ErrorKind::BadRequest)
        );
        assert_eq!(
            AnkoderError::ServerError("boom".into()).kind(),
            Some(ErrorKind::ServerError)
        );
    }

    #[test]
    fn test_kind_for_ambient_errors() {
        assert_eq!(AnkoderError::MissingFile.kind(), None);
        assert_eq!(AnkoderError::SessionTokenParse("none".into()).kind(), None);
    }

    #[test]
    fn test_invalid_url_is_unclassified() {
        let err = AnkoderError::InvalidUrl("http://:0/job".into());
        assert_eq!(err.kind(), None);
        assert_eq!(err.to_string(), "Invalid URL: http://:0/job");
    }
}
