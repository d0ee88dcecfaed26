//! Filesystem-backed versioned cache store.
//!
//! One directory per store under the cache root, named with the version
//! tag. Each entry is a pair of files keyed by the request digest: a
//! JSON metadata file (method, url, status, headers, timestamp) and a
//! raw body file. Writes go through a temp-file rename so a concurrent
//! reader never observes a torn entry and per-key replacement is
//! last-writer-wins.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::entry::{format_age, CachedResponse, RequestKey};
use crate::models::Response;

/// Suffix of per-entry metadata files.
const META_SUFFIX: &str = ".meta.json";

/// Suffix of per-entry body files.
const BODY_SUFFIX: &str = ".body";

/// On-disk metadata for one entry; the body lives next to it.
#[derive(Debug, Serialize, Deserialize)]
struct EntryMeta {
    method: String,
    url: String,
    status: u16,
    headers: Vec<(String, String)>,
    cached_at: DateTime<Utc>,
}

/// Summary of a stored entry, for status listings.
#[derive(Debug)]
pub struct EntryInfo {
    pub method: String,
    pub url: String,
    pub status: u16,
    pub cached_at: DateTime<Utc>,
    pub body_bytes: u64,
}

impl EntryInfo {
    pub fn age_display(&self) -> String {
        format_age((Utc::now() - self.cached_at).num_minutes())
    }
}

/// A named, versioned key-value store of cached responses.
///
/// Clone is cheap; clones share the same directory and may be written
/// from detached tasks concurrently.
#[derive(Debug, Clone)]
pub struct CacheStore {
    name: String,
    dir: PathBuf,
}

impl CacheStore {
    /// Open the store `name` under `root`, creating it if needed.
    pub fn open(root: &Path, name: &str) -> Result<Self> {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache store: {}", dir.display()))?;
        Ok(Self {
            name: name.to_string(),
            dir,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn meta_path(&self, key: &RequestKey) -> PathBuf {
        self.dir.join(format!("{}{}", key.digest(), META_SUFFIX))
    }

    fn body_path(&self, key: &RequestKey) -> PathBuf {
        self.dir.join(format!("{}{}", key.digest(), BODY_SUFFIX))
    }

    /// Write a response under `key`, replacing any previous entry.
    ///
    /// Only GET requests may be cached; any other method is rejected.
    pub fn put(&self, key: &RequestKey, response: &Response) -> Result<()> {
        if !key.is_get() {
            return Err(anyhow!(
                "refusing to cache non-GET request: {} {}",
                key.method(),
                key.url()
            ));
        }

        let meta = EntryMeta {
            method: key.method().as_str().to_string(),
            url: key.url().to_string(),
            status: response.status,
            headers: response.headers.clone(),
            cached_at: Utc::now(),
        };

        // Body first, metadata last: an entry is visible only once both
        // files exist, so a reader never sees metadata without a body.
        atomic_write(&self.body_path(key), &response.body)?;
        atomic_write_json(&self.meta_path(key), &meta)?;

        debug!(store = %self.name, url = %key.url(), "cached response");
        Ok(())
    }

    /// Look up the entry for `key`, if present.
    pub fn lookup(&self, key: &RequestKey) -> Result<Option<CachedResponse>> {
        let meta_path = self.meta_path(key);
        let body_path = self.body_path(key);
        if !meta_path.exists() || !body_path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&meta_path)
            .with_context(|| format!("Failed to read cache metadata: {}", meta_path.display()))?;
        let meta: EntryMeta = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache metadata: {}", meta_path.display()))?;

        let body = std::fs::read(&body_path)
            .with_context(|| format!("Failed to read cache body: {}", body_path.display()))?;

        Ok(Some(CachedResponse {
            response: Response {
                status: meta.status,
                headers: meta.headers,
                body,
            },
            cached_at: meta.cached_at,
        }))
    }

    pub fn contains(&self, key: &RequestKey) -> bool {
        self.meta_path(key).exists() && self.body_path(key).exists()
    }

    /// Number of complete entries in the store.
    pub fn len(&self) -> Result<usize> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Enumerate stored entries for status output.
    pub fn entries(&self) -> Result<Vec<EntryInfo>> {
        let mut entries = Vec::new();
        let dir = std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read cache store: {}", self.dir.display()))?;

        for item in dir {
            let path = item?.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(digest) = file_name.strip_suffix(META_SUFFIX) else {
                continue;
            };

            let body_path = self.dir.join(format!("{}{}", digest, BODY_SUFFIX));
            if !body_path.exists() {
                // Torn entry: body not yet renamed into place
                continue;
            }

            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read cache metadata: {}", path.display()))?;
            let meta: EntryMeta = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse cache metadata: {}", path.display()))?;

            entries.push(EntryInfo {
                method: meta.method,
                url: meta.url,
                status: meta.status,
                cached_at: meta.cached_at,
                body_bytes: std::fs::metadata(&body_path)?.len(),
            });
        }

        entries.sort_by(|a, b| a.url.cmp(&b.url));
        Ok(entries)
    }
}

/// List the names of every store under `root`.
pub fn list_stores(root: &Path) -> Result<Vec<String>> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let dir = std::fs::read_dir(root)
        .with_context(|| format!("Failed to read cache root: {}", root.display()))?;
    for item in dir {
        let item = item?;
        if item.file_type()?.is_dir() {
            if let Ok(name) = item.file_name().into_string() {
                names.push(name);
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Delete the store `name` under `root` and everything in it.
pub fn delete_store(root: &Path, name: &str) -> Result<()> {
    let dir = root.join(name);
    std::fs::remove_dir_all(&dir)
        .with_context(|| format!("Failed to delete cache store: {}", dir.display()))?;
    Ok(())
}

/// Write a file atomically (write to .tmp, then rename).
fn atomic_write(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, contents)
        .with_context(|| format!("Failed to write temp file: {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to rename into place: {}", path.display()))?;
    Ok(())
}

fn atomic_write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec(value).context("Failed to serialize cache metadata")?;
    atomic_write(path, &json)
}

// ============================================================================
// Tests
// ============================================================================
