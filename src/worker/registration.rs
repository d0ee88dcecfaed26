//! Host-side registration of the offline worker.
//!
//! The hosting application registers a worker once at startup, pointing
//! it at the configured origin and scope. Registration drives the full
//! lifecycle - install, then immediate activation - so by the time it
//! returns, the worker is intercepting. Version updates install the new
//! worker alongside the running one and switch traffic over without any
//! restart of the hosting application.

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::models::{Request, Response};
use crate::net::NetworkBackend;

use super::error::WorkerError;
use super::manager::OfflineManager;

/// An active registration: one controlling worker for one scope.
pub struct Registration {
    scope: String,
    backend: Arc<dyn NetworkBackend>,
    active: Arc<OfflineManager>,
}

impl Registration {
    /// Install and activate a worker for `config`'s scope.
    ///
    /// Install failures propagate; the caller (or its next startup) is
    /// the retry mechanism.
    pub async fn register(
        config: &Config,
        backend: Arc<dyn NetworkBackend>,
    ) -> Result<Self, WorkerError> {
        let manager = Arc::new(OfflineManager::new(config, Arc::clone(&backend))?);
        manager.install().await?;
        manager.activate().await?;

        let scope = config.scope_url();
        info!(scope = %scope, store = %config.store_name(), "offline worker registered");
        Ok(Self {
            scope,
            backend,
            active: manager,
        })
    }

    /// Deploy a new version: install it while the current worker keeps
    /// serving, then activate it (pruning superseded stores) and switch
    /// interception over.
    pub async fn update(&mut self, config: &Config) -> Result<(), WorkerError> {
        let next = Arc::new(OfflineManager::new(config, Arc::clone(&self.backend))?);
        next.install().await?;
        next.activate().await?;

        self.scope = config.scope_url();
        self.active = next;
        info!(scope = %self.scope, store = %config.store_name(), "offline worker updated");
        Ok(())
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn manager(&self) -> &Arc<OfflineManager> {
        &self.active
    }

    /// Page-side fetch entry point.
    ///
    /// Requests outside the registered scope bypass the worker entirely
    /// and go straight to the network; in-scope requests are handled by
    /// the active worker.
    pub async fn fetch(&self, request: &Request) -> Result<Option<Response>, WorkerError> {
        if !request.url.starts_with(&self.scope) {
            let response = self.backend.fetch(request).await?;
            return Ok(Some(response));
        }
        self.active.handle(request).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::list_stores;
    use crate::cache::RequestKey;
    use crate::worker::testing::{seeded_backend, test_config, wait_for_entry};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_register_installs_and_activates() {
        let root = TempDir::new().unwrap();
        let backend = Arc::new(seeded_backend("https://app.test"));
        let config = test_config(root.path(), "https://app.test");

        let registration = Registration::register(&config, backend).await.unwrap();

        assert!(registration.manager().state().await.is_active());
        assert_eq!(registration.manager().store().len().unwrap(), 3);
        assert_eq!(registration.scope(), "https://app.test/");
    }

    #[tokio::test]
    async fn test_update_switches_versions_and_prunes() {
        let root = TempDir::new().unwrap();
        let backend = Arc::new(seeded_backend("https://app.test"));
        let config = test_config(root.path(), "https://app.test");

        let mut registration =
            Registration::register(&config, Arc::clone(&backend) as Arc<dyn NetworkBackend>)
                .await
                .unwrap();

        let bumped = Config {
            cache_version: 2,
            ..config
        };
        registration.update(&bumped).await.unwrap();

        assert_eq!(list_stores(root.path()).unwrap(), vec!["shellcache-v2"]);
        assert_eq!(registration.manager().store().name(), "shellcache-v2");

        // The new version serves traffic immediately
        let response = registration
            .fetch(&Request::get("https://app.test/"))
            .await
            .unwrap()
            .expect("response");
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_current_worker_serving() {
        let root = TempDir::new().unwrap();
        let backend = Arc::new(seeded_backend("https://app.test"));
        let config = test_config(root.path(), "https://app.test");

        let mut registration =
            Registration::register(&config, Arc::clone(&backend) as Arc<dyn NetworkBackend>)
                .await
                .unwrap();

        backend.set_offline(true);
        let bumped = Config {
            cache_version: 2,
            ..config
        };
        let err = registration.update(&bumped).await.unwrap_err();
        assert!(matches!(err, WorkerError::InstallFailed { .. }));

        // Old version still registered and serving from its cache
        assert_eq!(registration.manager().store().name(), "shellcache-v1");
        let response = registration
            .fetch(&Request::get("https://app.test/"))
            .await
            .unwrap()
            .expect("response");
        assert_eq!(response.body, b"<html>shell</html>".to_vec());
    }

    #[tokio::test]
    async fn test_out_of_scope_requests_bypass_the_worker() {
        let root = TempDir::new().unwrap();
        let backend = Arc::new(seeded_backend("https://app.test"));
        backend.insert(
            "https://cdn.other/lib.js",
            Response::new(200, b"lib".to_vec()),
        );
        let config = test_config(root.path(), "https://app.test");

        let registration =
            Registration::register(&config, Arc::clone(&backend) as Arc<dyn NetworkBackend>)
                .await
                .unwrap();

        let response = registration
            .fetch(&Request::get("https://cdn.other/lib.js"))
            .await
            .unwrap()
            .expect("response");
        assert_eq!(response.body, b"lib".to_vec());

        // Bypassed traffic is never cached
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!registration
            .manager()
            .store()
            .contains(&RequestKey::get("https://cdn.other/lib.js")));
    }

    /// The full offline scenario: install seeds the store, online
    /// fetches refresh it, offline fetches fall back to cache and then
    /// to the offline page.
    #[tokio::test]
    async fn test_end_to_end_offline_scenario() {
        let root = TempDir::new().unwrap();
        let backend = Arc::new(seeded_backend("https://app.test"));
        let config = test_config(root.path(), "https://app.test");

        let registration =
            Registration::register(&config, Arc::clone(&backend) as Arc<dyn NetworkBackend>)
                .await
                .unwrap();
        assert_eq!(registration.manager().store().len().unwrap(), 3);

        // Online: network body comes back and the entry is refreshed
        let response = registration
            .fetch(&Request::get("https://app.test/"))
            .await
            .unwrap()
            .expect("response");
        assert_eq!(response.body, b"<html>shell</html>".to_vec());
        let key = RequestKey::get("https://app.test/");
        assert!(wait_for_entry(registration.manager().store(), &key).await);

        // Offline: the cached shell is served
        backend.set_offline(true);
        let response = registration
            .fetch(&Request::get("https://app.test/"))
            .await
            .unwrap()
            .expect("response");
        assert_eq!(response.body, b"<html>shell</html>".to_vec());

        // Offline, never-cached page: the offline fallback is served
        let response = registration
            .fetch(&Request::get("https://app.test/missing-page"))
            .await
            .unwrap()
            .expect("response");
        assert_eq!(response.body, b"<html>offline</html>".to_vec());
    }
}
