//! Error handling for catalog API operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Common error type for catalog API operations.
///
/// [`CatalogClientError::Transport`] and [`CatalogClientError::Connection`]
/// together form the transport class of errors,
/// [`CatalogClientError::Decode`] covers every response that arrived
/// but could not be turned into plant records.
#[derive(Debug, Error)]
pub enum CatalogClientError {
    /// The catalog answered with a non-success status.
    #[error("catalog responded with HTTP status {status}")]
    Transport { status: StatusCode },

    /// The request failed before a status was received.
    #[error("could not reach the catalog at '{url}'")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was empty, malformed or had an unexpected shape.
    #[error("could not decode catalog response: {detail}")]
    Decode { detail: String },

    /// The request was rejected locally and never sent.
    #[error("invalid catalog request: {0}")]
    InvalidRequest(String),

    #[error("invalid catalog client configuration: {0}")]
    Config(String),
}

impl CatalogClientError {
    pub(crate) fn decode(detail: impl Into<String>) -> Self {
        CatalogClientError::Decode {
            detail: detail.into(),
        }
    }

    /// The HTTP status reported by the catalog, if any was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CatalogClientError::Transport { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error happened at the transport level,
    /// i.e. a non-success status or a failed connection.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CatalogClientError::Transport { .. } | CatalogClientError::Connection { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
