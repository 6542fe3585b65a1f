//! Shared application state.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::assets::AssetCache;

/// State shared by every request: the configuration built at startup, one
/// pooled HTTP client, and the installed asset cache. There is no other
/// cross-request state.
pub struct AppState {
    pub config: ServerConfig,
    pub http: reqwest::Client,
    pub assets: AssetCache,
}

impl AppState {
    pub async fn new(config: ServerConfig) -> Arc<Self> {
        let assets = AssetCache::new(config.static_dir.clone(), &config.asset_cache_version);
        assets.install().await;
        assets.activate().await;

        Arc::new(Self {
            config,
            http: reqwest::Client::new(),
            assets,
        })
    }
}
