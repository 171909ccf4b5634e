//! Error types for the TuneIn client

use crate::models::Envelope;

/// Result type alias for TuneIn operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the TuneIn client
///
/// Two families matter to callers:
///
/// - **transport** errors ([`Error::Http`], [`Error::Json`]): the exchange
///   could not be completed or its body could not be decoded at all
/// - **remote faults** ([`Error::RemoteFault`]): TuneIn answered with a
///   well-formed envelope reporting a non-200 status
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is not a decodable TuneIn envelope
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// TuneIn reported a non-success status
    ///
    /// The whole envelope is kept so callers can inspect `head.fault`
    /// and any partial `body`.
    #[error("TuneIn request error: {}", .0.head.fault.as_deref().unwrap_or("unknown fault"))]
    RemoteFault(Box<Envelope>),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// YAML configuration could not be parsed
    #[error("Configuration error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create a remote fault from a decoded envelope
    pub fn remote_fault(envelope: Envelope) -> Self {
        Self::RemoteFault(Box::new(envelope))
    }

    /// True when the network exchange or the body decoding failed
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Json(_))
    }

    /// True when TuneIn answered but reported a failure
    pub fn is_remote_fault(&self) -> bool {
        matches!(self, Self::RemoteFault(_))
    }

    /// The envelope attached to a remote fault
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            Self::RemoteFault(envelope) => Some(envelope),
            _ => None,
        }
    }

    /// The `head.fault` message of a remote fault
    pub fn fault(&self) -> Option<&str> {
        self.envelope().and_then(|e| e.head.fault.as_deref())
    }
}
