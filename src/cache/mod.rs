//! Durable response caching for offline operation.
//!
//! This module provides the versioned `CacheStore` that holds full
//! responses on disk, keyed by request identity. Stores are named with
//! an embedded version tag (`<app-name>-v<N>`); bumping the tag on
//! redeploy is the sole mechanism for invalidating old entries, which
//! are pruned when the new version activates.

pub mod entry;
pub mod store;

pub use entry::{CachedResponse, RequestKey};
pub use store::{CacheStore, EntryInfo};
