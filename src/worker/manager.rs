//! The offline cache manager: seeds its store, prunes superseded
//! versions, and serves requests network-first with cache fallback.

use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::store::{self, CacheStore};
use crate::cache::RequestKey;
use crate::config::Config;
use crate::models::{Request, Response};
use crate::net::NetworkBackend;

use super::error::WorkerError;
use super::state::LifecycleState;

/// Maximum concurrent seed fetches during install.
/// The Seed Set is small; 4 keeps install fast without hammering the origin.
const MAX_CONCURRENT_SEED_FETCHES: usize = 4;

/// One deployed version of the offline worker.
///
/// Construction opens (or creates) the version's cache store and leaves
/// the worker in `Installing`. The hosting side drives `install` and
/// `activate`; after that every in-scope request goes through `handle`.
pub struct OfflineManager {
    cache_root: PathBuf,
    store: CacheStore,
    seed_urls: Vec<String>,
    offline_url: String,
    backend: Arc<dyn NetworkBackend>,
    state: RwLock<LifecycleState>,
}

impl OfflineManager {
    pub fn new(config: &Config, backend: Arc<dyn NetworkBackend>) -> Result<Self, WorkerError> {
        let cache_root = config.cache_root()?;
        let store = CacheStore::open(&cache_root, &config.store_name())?;
        Ok(Self {
            cache_root,
            store,
            seed_urls: config.seed_urls(),
            offline_url: config.offline_url(),
            backend,
            state: RwLock::new(LifecycleState::Installing),
        })
    }

    pub async fn state(&self) -> LifecycleState {
        *self.state.read().await
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Seed the store with every resource in the Seed Set.
    ///
    /// All seeds are fetched before anything is written, so a failure
    /// cannot leave a partially seeded store behind: the store is
    /// removed and the worker stays in `Installing` for the host to
    /// retry. A seed response with a non-2xx status fails the install
    /// the same way an unreachable origin does.
    pub async fn install(&self) -> Result<(), WorkerError> {
        info!(store = %self.store.name(), seeds = self.seed_urls.len(), "installing offline worker");

        let results: Vec<(String, _)> = stream::iter(self.seed_urls.clone())
            .map(|url| {
                let backend = Arc::clone(&self.backend);
                async move {
                    let result = backend.fetch(&Request::get(&url)).await;
                    (url, result)
                }
            })
            .buffer_unordered(MAX_CONCURRENT_SEED_FETCHES)
            .collect()
            .await;

        let mut fetched = Vec::with_capacity(results.len());
        for (url, result) in results {
            match result {
                Ok(response) if response.is_success() => fetched.push((url, response)),
                Ok(response) => {
                    return Err(self.abandon_install(url, format!("status {}", response.status)));
                }
                Err(e) => {
                    return Err(self.abandon_install(url, e.to_string()));
                }
            }
        }

        for (url, response) in fetched {
            if let Err(e) = self.store.put(&RequestKey::get(&url), &response) {
                return Err(self.abandon_install(url, e.to_string()));
            }
        }

        *self.state.write().await = LifecycleState::Installed;
        debug!(store = %self.store.name(), "seed set fully populated");
        Ok(())
    }

    fn abandon_install(&self, url: String, reason: String) -> WorkerError {
        // A partially seeded store is not a valid state; remove it so a
        // retry starts clean.
        if let Err(e) = store::delete_store(&self.cache_root, self.store.name()) {
            warn!(store = %self.store.name(), error = %e, "failed to remove partially seeded store");
        }
        WorkerError::InstallFailed { url, reason }
    }

    /// Delete every store whose version tag differs from this one, then
    /// start intercepting.
    ///
    /// Pruning guarantees no response from a superseded version is ever
    /// served again; a store that cannot be deleted is logged and left
    /// for the next activation, but is never read from.
    pub async fn activate(&self) -> Result<(), WorkerError> {
        *self.state.write().await = LifecycleState::Activating;

        for name in store::list_stores(&self.cache_root)? {
            if name == self.store.name() {
                continue;
            }
            match store::delete_store(&self.cache_root, &name) {
                Ok(()) => info!(store = %name, "deleted superseded cache store"),
                Err(e) => warn!(store = %name, error = %e, "failed to delete superseded cache store"),
            }
        }

        *self.state.write().await = LifecycleState::Active;
        info!(store = %self.store.name(), "offline worker active");
        Ok(())
    }

    /// Single request-handling entry point.
    ///
    /// GET requests are served network-first: one network attempt, and
    /// on success the response is returned immediately while a detached
    /// task refreshes the cache. On transport failure the cached entry
    /// for the key is served, then the offline fallback. `Ok(None)` only
    /// occurs when even the fallback is missing, which a fully installed
    /// worker does not exhibit.
    ///
    /// Non-GET requests pass through to the network untouched; their
    /// failures propagate to the caller unchanged.
    pub async fn handle(&self, request: &Request) -> Result<Option<Response>, WorkerError> {
        let state = self.state().await;
        if !state.is_active() {
            return Err(WorkerError::NotActive(state));
        }

        if !request.method.is_get() {
            let response = self.backend.fetch(request).await?;
            return Ok(Some(response));
        }

        let key = RequestKey::for_request(request);
        match self.backend.fetch(request).await {
            Ok(response) => {
                self.refresh_entry(key, response.clone());
                Ok(Some(response))
            }
            Err(e) => {
                debug!(url = %request.url, error = %e, "network fetch failed, serving from cache");
                Ok(self.fallback(&key))
            }
        }
    }

    /// Best-effort cache refresh after a successful network fetch.
    /// Detached: a failed write is logged and never reaches the caller.
    fn refresh_entry(&self, key: RequestKey, response: Response) {
        let store = self.store.clone();
        tokio::spawn(async move {
            if let Err(e) = store.put(&key, &response) {
                warn!(url = %key.url(), error = %e, "failed to refresh cache entry");
            }
        });
    }

    fn fallback(&self, key: &RequestKey) -> Option<Response> {
        match self.store.lookup(key) {
            Ok(Some(cached)) => return Some(cached.response),
            Ok(None) => {}
            Err(e) => warn!(url = %key.url(), error = %e, "cache lookup failed"),
        }

        let offline_key = RequestKey::get(&self.offline_url);
        match self.store.lookup(&offline_key) {
            Ok(Some(cached)) => Some(cached.response),
            Ok(None) => None,
            Err(e) => {
                warn!(url = %self.offline_url, error = %e, "offline fallback lookup failed");
                None
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
