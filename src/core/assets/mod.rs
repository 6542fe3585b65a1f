//! Versioned in-process static asset cache.
//!
//! A fixed list of assets is loaded from the static directory when the
//! cache installs; lookups serve the cached copy when present and fall
//! back to a disk read otherwise. Entry keys carry a version-tagged cache
//! name, so re-tagging the cache and activating it drops every entry that
//! still carries a stale tag. Navigation requests that miss fall back to
//! the cached root document.

use std::path::PathBuf;

use bytes::Bytes;
use moka::future::Cache;

/// Assets loaded into the cache on install
const PRECACHE_ASSETS: &[&str] = &["/index.html", "/manifest.json"];

/// Root document served to navigation requests that miss
const ROOT_DOCUMENT: &str = "/index.html";

/// A cached static file
#[derive(Debug, Clone)]
pub struct CachedAsset {
    pub body: Bytes,
    pub content_type: &'static str,
}

pub struct AssetCache {
    root: PathBuf,
    /// Version-tagged cache name, e.g. `assets-v4`
    name: String,
    entries: Cache<String, CachedAsset>,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>, version: &str) -> Self {
        Self {
            root: root.into(),
            name: format!("assets-{version}"),
            entries: Cache::builder()
                .max_capacity(64)
                .support_invalidation_closures()
                .build(),
        }
    }

    /// A handle over the same entry store under a different version tag.
    /// Entries tagged with the old name survive until [`Self::activate`]
    /// runs on the new handle.
    pub fn with_version(&self, version: &str) -> Self {
        Self {
            root: self.root.clone(),
            name: format!("assets-{version}"),
            entries: self.entries.clone(),
        }
    }

    /// Load the fixed asset list from disk. A missing file is logged and
    /// skipped; the cache still serves everything else.
    pub async fn install(&self) {
        for path in PRECACHE_ASSETS {
            match self.read_from_disk(path).await {
                Some(asset) => {
                    self.entries.insert(self.key(path), asset).await;
                }
                None => tracing::warn!(path, "precache asset missing from static directory"),
            }
        }
    }

    /// Drop entries that carry a stale cache name.
    pub async fn activate(&self) {
        let prefix = format!("{}:", self.name);
        if let Err(e) = self
            .entries
            .invalidate_entries_if(move |key, _| !key.starts_with(&prefix))
        {
            tracing::warn!(error = %e, "failed to invalidate stale asset cache entries");
        }
    }

    /// Cache-then-disk lookup. `/` resolves to the root document.
    pub async fn get(&self, path: &str) -> Option<CachedAsset> {
        let path = if path == "/" { ROOT_DOCUMENT } else { path };
        if let Some(asset) = self.entries.get(&self.key(path)).await {
            return Some(asset);
        }
        self.read_from_disk(path).await
    }

    /// Cached root document for navigation fallback. Cache-only: when the
    /// root document was never cached there is nothing to fall back to.
    pub async fn navigation_fallback(&self) -> Option<CachedAsset> {
        self.entries.get(&self.key(ROOT_DOCUMENT)).await
    }

    fn key(&self, path: &str) -> String {
        format!("{}:{}", self.name, path)
    }

    async fn read_from_disk(&self, path: &str) -> Option<CachedAsset> {
        let relative = path.trim_start_matches('/');
        if relative.is_empty() || relative.split('/').any(|part| part == "..") {
            return None;
        }
        let body = tokio::fs::read(self.root.join(relative)).await.ok()?;
        Some(CachedAsset {
            body: body.into(),
            content_type: content_type_for(path),
        })
    }
}

fn content_type_for(path: &str) -> &'static str {
    match path.rsplit('.').next().unwrap_or_default() {
        "html" => "text/html; charset=utf-8",
        "js" => "text/javascript",
        "css" => "text/css",
        "json" => "application/json",
        "png" => "image/png",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        _ => "application/octet-stream",
    }
}
