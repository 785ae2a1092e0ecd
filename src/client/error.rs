/// Error type for requests to the LIS2 service.
use thiserror::Error;

/// Errors that can occur when configuring the client or calling the service.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network-related errors (connection refused, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The transport's deadline elapsed before a response arrived
    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("Service error: status {status}")]
    Service { status: u16, body: String },

    /// A 2xx body that is not the JSON the service documents
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// Invalid service address
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client configuration rejected before any request was made
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation parameters rejected before any request was made
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RequestError {
    /// Classifies a `reqwest` failure as a timeout or a plain network error.
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            RequestError::Timeout(error)
        } else {
            RequestError::Network(error)
        }
    }

    /// Returns the HTTP status the service replied with, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Service { status, .. } => Some(*status),
            RequestError::Network(e) | RequestError::Timeout(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns the response body text the service sent with an error status.
    ///
    /// `None` when there was no response or the body was empty.
    pub fn body(&self) -> Option<&str> {
        match self {
            RequestError::Service { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }

    /// True when the request never got an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, RequestError::Network(_) | RequestError::Timeout(_))
    }
}
