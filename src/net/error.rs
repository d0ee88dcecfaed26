use thiserror::Error;

/// Errors produced by a network backend.
///
/// Only transport-level failures appear here; an HTTP response with an
/// error status is still a successful fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The origin could not be reached at all: no connectivity, DNS
    /// failure, or an aborted request.
    #[error("unreachable: {0}")]
    Unreachable(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
