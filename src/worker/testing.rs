//! Scripted network backend and fixtures shared by worker tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::{CacheStore, RequestKey};
use crate::config::Config;
use crate::models::{Request, Response};
use crate::net::{FetchError, NetworkBackend};

/// In-memory backend with scripted responses and a connectivity switch.
///
/// Unscripted URLs answer 404, mirroring an origin that is reachable
/// but has no such resource; flipping `set_offline` makes every fetch
/// fail at the transport level instead.
pub(crate) struct ScriptedBackend {
    responses: Mutex<HashMap<String, Response>>,
    offline: AtomicBool,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            offline: AtomicBool::new(false),
        }
    }

    pub fn insert(&self, url: &str, response: Response) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl NetworkBackend for ScriptedBackend {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(FetchError::Unreachable("network is down".to_string()));
        }
        let responses = self.responses.lock().unwrap();
        Ok(responses
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| Response::new(404, b"not found".to_vec())))
    }
}

/// Backend preloaded with the default shell seed resources for `origin`.
pub(crate) fn seeded_backend(origin: &str) -> ScriptedBackend {
    let backend = ScriptedBackend::new();
    backend.insert(
        &format!("{}/", origin),
        Response::new(200, b"<html>shell</html>".to_vec()),
    );
    backend.insert(
        &format!("{}/offline.html", origin),
        Response::new(200, b"<html>offline</html>".to_vec()),
    );
    backend.insert(
        &format!("{}/manifest.json", origin),
        Response::new(200, b"{\"name\":\"shell\"}".to_vec()),
    );
    backend
}

/// Config rooted at a temp directory with the default seed set.
pub(crate) fn test_config(root: &Path, origin: &str) -> Config {
    Config {
        origin: origin.to_string(),
        cache_dir: Some(root.to_path_buf()),
        ..Config::default()
    }
}

/// Poll until `store` holds `key`; detached refresh writes land
/// asynchronously, so tests cannot assert on them immediately.
pub(crate) async fn wait_for_entry(store: &CacheStore, key: &RequestKey) -> bool {
    for _ in 0..100 {
        if store.contains(key) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
