//! Runtime configuration: where the catalog and assets live and where to listen.

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use crate::{
    assets::store::{ConfiguredStore, HttpAssetStore, LocalAssetStore},
    catalog::model::Catalog,
    foundation::error::SpriteResult,
    render::pipeline::SpriteGenerator,
};

/// Remote origin the character assets are published under.
pub const DEFAULT_ASSETS_BASE_URL: &str =
    "https://forgeai-characters-spritesheets.s3.us-west-1.amazonaws.com/spritesheets";

/// Per-request bound on asset probes and fetches.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Address the HTTP service binds to by default.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
/// Runtime settings for the generator and the HTTP service.
pub struct Config {
    /// Base URL of the remote asset store.
    pub assets_base_url: String,
    /// Catalog JSON file or directory of per-entry JSON files.
    pub catalog_path: PathBuf,
    /// Local asset mirror; when set it replaces the remote store.
    pub assets_dir: Option<PathBuf>,
    /// Timeout of a single asset request.
    pub probe_timeout: Duration,
    /// Listen address of `serve`.
    pub bind: SocketAddr,
}

impl Config {
    /// Defaults for everything except the catalog location.
    pub fn new(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            assets_base_url: DEFAULT_ASSETS_BASE_URL.to_string(),
            catalog_path: catalog_path.into(),
            assets_dir: None,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }

    /// Open the configured asset store.
    pub fn open_store(&self) -> SpriteResult<ConfiguredStore> {
        Ok(match &self.assets_dir {
            Some(dir) => ConfiguredStore::Local(LocalAssetStore::new(dir)),
            None => ConfiguredStore::Http(HttpAssetStore::new(
                self.assets_base_url.clone(),
                self.probe_timeout,
            )?),
        })
    }

    /// Load the catalog and open the store.
    #[tracing::instrument(skip(self), fields(catalog = %self.catalog_path.display()))]
    pub fn build_generator(&self) -> SpriteResult<SpriteGenerator<ConfiguredStore>> {
        let catalog = Catalog::from_path(&self.catalog_path)?;
        let store = self.open_store()?;
        tracing::info!(entries = catalog.len(), "catalog loaded");
        Ok(SpriteGenerator::new(Arc::new(catalog), Arc::new(store)))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
