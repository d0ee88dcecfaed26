//! Network access for the offline worker.
//!
//! This module provides the `NetworkBackend` trait - the single seam the
//! worker uses to reach the network - and the production `HttpBackend`
//! built on reqwest. Tests substitute a scripted backend to simulate
//! connectivity loss.

pub mod client;
pub mod error;

pub use client::{HttpBackend, NetworkBackend};
pub use error::FetchError;
