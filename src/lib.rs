//! shellcache - offline-first application shell cache.
//!
//! This crate keeps an HTTP application shell usable when the device
//! has no connectivity. A registered worker seeds a durable, versioned
//! store with the shell resources, then serves every in-scope GET
//! network-first: fresh content whenever the origin is reachable, the
//! cached copy when it is not, and a designated offline page when even
//! that is missing. The cache is a resilience mechanism, never a
//! freshness optimization.
//!
//! - `worker`: lifecycle state machine, request handling, registration
//! - `cache`: versioned on-disk store of full responses
//! - `net`: the network seam and its reqwest implementation
//! - `install_prompt`: deferred "install this app" offer handling
//! - `config`: persisted configuration (origin, version tag, seed set)

pub mod cache;
pub mod config;
pub mod install_prompt;
pub mod models;
pub mod net;
pub mod worker;

pub use cache::{CacheStore, CachedResponse, RequestKey};
pub use config::Config;
pub use install_prompt::{DisplayMode, InstallOffer, InstallOutcome, InstallPrompt};
pub use models::{Method, Request, Response};
pub use net::{FetchError, HttpBackend, NetworkBackend};
pub use worker::{LifecycleState, OfflineManager, Registration, WorkerError};
