use thiserror::Error;

use crate::net::FetchError;

use super::state::LifecycleState;

#[derive(Error, Debug)]
pub enum WorkerError {
    /// A Seed Set resource could not be fetched or written during
    /// install. Fatal to the installation attempt; the host may retry.
    #[error("install failed for {url}: {reason}")]
    InstallFailed { url: String, reason: String },

    /// Request interception was attempted outside the Active state.
    #[error("worker is {0}, not active")]
    NotActive(LifecycleState),

    /// The cache store could not be opened or enumerated.
    #[error("cache store error: {0}")]
    Store(#[from] anyhow::Error),

    /// Pass-through network failure for a request the worker does not
    /// intercept. GET interception never surfaces this.
    #[error(transparent)]
    Network(#[from] FetchError),
}
