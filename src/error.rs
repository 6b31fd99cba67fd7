// src/error.rs
use reqwest::header::InvalidHeaderValue;
use reqwest::StatusCode;
use thiserror::Error;

/// Boxed cause carried by [`ZurichError::Connection`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification of a [`ZurichError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Timeout, transport-level failure (DNS, refused, reset, TLS) or a non-2xx status.
    Connection,
    /// The exchange succeeded but the payload is not what the API promises.
    Data,
    /// Anything else the client could not classify more precisely.
    Client,
}

#[derive(Error, Debug)]
pub enum ZurichError {
    #[error("{message}")]
    Connection {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("Unexpected content type response from the Open Data Platform API: {content_type:?}")]
    UnexpectedContentType { content_type: String, body: String },

    #[error("Error occurred while communicating with the Open Data Platform API: HTTP {status}")]
    Status { status: StatusCode, body: String },

    #[error("HTTP client error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("URL parsing failed: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("JSON processing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ZurichError {
    pub(crate) fn timeout(source: tokio::time::error::Elapsed) -> Self {
        ZurichError::Connection {
            message: "Timeout occurred while connecting to the Open Data Platform API.".to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn transport(source: reqwest::Error) -> Self {
        ZurichError::Connection {
            message: "Error occurred while communicating with the Open Data Platform API."
                .to_string(),
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ZurichError::Connection { .. } | ZurichError::Status { .. } => ErrorKind::Connection,
            ZurichError::UnexpectedContentType { .. } => ErrorKind::Data,
            _ => ErrorKind::Client,
        }
    }

    pub fn is_connection(&self) -> bool {
        self.kind() == ErrorKind::Connection
    }

    pub fn is_data(&self) -> bool {
        self.kind() == ErrorKind::Data
    }

    /// The `Content-Type` the server answered with, for content-type errors.
    pub fn content_type(&self) -> Option<&str> {
        match self {
            ZurichError::UnexpectedContentType { content_type, .. } => Some(content_type),
            _ => None,
        }
    }

    /// Raw response body kept for diagnostics, when the error has one.
    pub fn body(&self) -> Option<&str> {
        match self {
            ZurichError::UnexpectedContentType { body, .. } | ZurichError::Status { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }
}
