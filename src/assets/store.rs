use std::{
    collections::HashMap,
    future::Future,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Context;

use crate::foundation::error::{SpriteError, SpriteResult};

/// Base URL used by stores that are not backed by a remote origin.
pub const LOCAL_BASE_URL: &str = "local://assets";

/// Read-only byte-object store that sprite assets are probed and loaded from.
///
/// `exists` must never fail: any error (missing object, transport failure, timeout) reads as
/// "does not exist".
pub trait AssetStore: Send + Sync {
    /// Base URL that asset paths are joined onto.
    fn base_url(&self) -> &str;

    /// Existence-only probe for `url`.
    fn exists(&self, url: &str) -> impl Future<Output = bool> + Send;

    /// Fetch the bytes stored at `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = SpriteResult<Vec<u8>>> + Send;

    /// Build the URL of `segments` under this store's base.
    fn url_for(&self, segments: &[&str]) -> String {
        asset_url(self.base_url(), segments)
    }
}

impl<S: AssetStore> AssetStore for Arc<S> {
    fn base_url(&self) -> &str {
        (**self).base_url()
    }

    fn exists(&self, url: &str) -> impl Future<Output = bool> + Send {
        (**self).exists(url)
    }

    fn fetch(&self, url: &str) -> impl Future<Output = SpriteResult<Vec<u8>>> + Send {
        (**self).fetch(url)
    }
}

/// Join `segments` under `base_url`.
///
/// Empty segments are dropped and leading/trailing `/` are trimmed from each segment.
pub fn asset_url(base_url: &str, segments: &[&str]) -> String {
    let joined = segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}", base_url.trim_end_matches('/'), joined)
}

/// Normalize and validate store-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects parent
/// traversals (`..`).
pub fn normalize_rel_path(source: &str) -> SpriteResult<String> {
    let s = source.replace('\\', "/");
    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SpriteError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SpriteError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[derive(Clone, Debug)]
/// Asset store backed by an HTTP origin (for example an S3 bucket).
pub struct HttpAssetStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssetStore {
    /// Create a store rooted at `base_url`; every request is bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SpriteResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build asset http client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl AssetStore for HttpAssetStore {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn exists(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(err) => {
                tracing::debug!(%url, error = %err, "asset probe failed");
                false
            }
        }
    }

    async fn fetch(&self, url: &str) -> SpriteResult<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SpriteError::asset(format!("fetch '{url}': {e}")))?;
        let resp = resp
            .error_for_status()
            .map_err(|e| SpriteError::asset(format!("fetch '{url}': {e}")))?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| SpriteError::asset(format!("read body of '{url}': {e}")))?;
        Ok(bytes.to_vec())
    }
}

#[derive(Clone, Debug)]
/// Asset store backed by a local directory mirroring the remote layout.
pub struct LocalAssetStore {
    root: PathBuf,
    base_url: String,
}

impl LocalAssetStore {
    /// Serve files under `root`, addressed as [`LOCAL_BASE_URL`]`/<relative path>`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            base_url: LOCAL_BASE_URL.to_string(),
        }
    }

    /// Map a store URL onto a file under the root.
    pub fn path_for(&self, url: &str) -> SpriteResult<PathBuf> {
        let rel = url
            .strip_prefix(self.base_url.as_str())
            .ok_or_else(|| SpriteError::asset(format!("url '{url}' is outside this store")))?;
        Ok(self.root.join(normalize_rel_path(rel)?))
    }
}

impl AssetStore for LocalAssetStore {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn exists(&self, url: &str) -> bool {
        let Ok(path) = self.path_for(url) else {
            return false;
        };
        tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn fetch(&self, url: &str) -> SpriteResult<Vec<u8>> {
        let path = self.path_for(url)?;
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("read asset '{}'", path.display()))?;
        Ok(bytes)
    }
}

#[derive(Clone, Debug)]
/// Store chosen at runtime from configuration.
pub enum ConfiguredStore {
    /// Remote origin probed over HTTP.
    Http(HttpAssetStore),
    /// Local mirror of the asset tree.
    Local(LocalAssetStore),
}

impl AssetStore for ConfiguredStore {
    fn base_url(&self) -> &str {
        match self {
            Self::Http(s) => s.base_url(),
            Self::Local(s) => s.base_url(),
        }
    }

    async fn exists(&self, url: &str) -> bool {
        match self {
            Self::Http(s) => s.exists(url).await,
            Self::Local(s) => s.exists(url).await,
        }
    }

    async fn fetch(&self, url: &str) -> SpriteResult<Vec<u8>> {
        match self {
            Self::Http(s) => s.fetch(url).await,
            Self::Local(s) => s.fetch(url).await,
        }
    }
}

/// In-memory store for tests and debugging; records every probe in call order.
#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    objects: HashMap<String, Vec<u8>>,
    probes: Mutex<Vec<String>>,
    fetches: Mutex<Vec<String>>,
}

impl MemoryAssetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object at `rel_path` (relative to [`LOCAL_BASE_URL`]).
    pub fn insert(&mut self, rel_path: &str, bytes: Vec<u8>) {
        self.objects
            .insert(asset_url(LOCAL_BASE_URL, &[rel_path]), bytes);
    }

    /// URLs passed to `exists`, in call order.
    pub fn probes(&self) -> Vec<String> {
        self.probes.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// URLs passed to `fetch`, in call order.
    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl AssetStore for MemoryAssetStore {
    fn base_url(&self) -> &str {
        LOCAL_BASE_URL
    }

    async fn exists(&self, url: &str) -> bool {
        if let Ok(mut probes) = self.probes.lock() {
            probes.push(url.to_string());
        }
        self.objects.contains_key(url)
    }

    async fn fetch(&self, url: &str) -> SpriteResult<Vec<u8>> {
        if let Ok(mut fetches) = self.fetches.lock() {
            fetches.push(url.to_string());
        }
        self.objects
            .get(url)
            .cloned()
            .ok_or_else(|| SpriteError::asset(format!("no object at '{url}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
