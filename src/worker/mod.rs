//! The offline worker: lifecycle, request interception, registration.
//!
//! A worker version moves through an explicit lifecycle (Installing,
//! Installed, Activating, Active). While Active it handles every
//! in-scope GET with a network-first, cache-as-fallback policy; the
//! cache exists for resilience against connectivity loss, not as a
//! performance layer. `Registration` is the host-facing entry point
//! that drives the lifecycle and dispatches requests.

pub mod error;
pub mod manager;
pub mod registration;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use error::WorkerError;
pub use manager::OfflineManager;
pub use registration::Registration;
pub use state::LifecycleState;
