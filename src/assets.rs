//! Static asset access
//!
//! Every loader in this crate reads its input through [`AssetSource`], so the same
//! code runs against the site directory on disk or against in-memory fixtures.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

/// Errors raised while fetching or decoding a static asset.
#[derive(Error, Debug)]
pub enum AssetError {
    /// No asset exists at the path.
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The asset exists but could not be read.
    #[error("Failed to read asset '{path}': {source}")]
    Io {
        /// Site-relative path of the asset.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The asset is not valid JSON for the requested type.
    #[error("Failed to parse asset '{path}': {source}")]
    Parse {
        /// Site-relative path of the asset.
        path: String,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// A read-only source of static text assets, addressed by site-relative path
/// (e.g. `assets/info.txt`).
#[allow(async_fn_in_trait)]
pub trait AssetSource {
    /// Fetches the asset at `path` as UTF-8 text.
    async fn fetch_text(&self, path: &str) -> Result<String, AssetError>;

    /// Fetches the asset at `path` and decodes it as JSON.
    async fn fetch_json<T>(&self, path: &str) -> Result<T, AssetError>
    where
        T: serde::de::DeserializeOwned,
    {
        let text = self.fetch_text(path).await?;
        serde_json::from_str(&text)
            .map_err(|source| AssetError::Parse { path: path.to_string(), source })
    }
}

/// Assets served from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsAssets {
    /// Site directory the asset paths are relative to.
    root: PathBuf,
}

impl FsAssets {
    /// Serves assets below `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Site directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for FsAssets {
    async fn fetch_text(&self, path: &str) -> Result<String, AssetError> {
        let full_path = self.root.join(path.trim_start_matches("./"));
        tracing::debug!(path = %full_path.display(), "Fetching asset");

        match tokio::fs::read_to_string(&full_path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AssetError::NotFound(path.to_string()))
            }
            Err(source) => Err(AssetError::Io { path: path.to_string(), source }),
        }
    }
}

/// Assets held in memory; used by tests and by callers that embed their data.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    /// File contents by site-relative path.
    files: HashMap<String, String>,
}

impl MemoryAssets {
    /// Empty asset set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `content` under `path`.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl AssetSource for MemoryAssets {
    async fn fetch_text(&self, path: &str) -> Result<String, AssetError> {
        self.files
            .get(path.trim_start_matches("./"))
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}
