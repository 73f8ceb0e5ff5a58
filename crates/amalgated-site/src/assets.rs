//! Static asset lookup.
//!
//! Sections refer to images by a stable key (usually the source file name)
//! and ask the registry for the URL the bundler produced. Keys that are not in
//! the registry resolve to `None` and the section leaves that item out.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, SiteError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetRegistry {
    urls: BTreeMap<String, String>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a flat `{"key": "url", ...}` manifest.
    pub fn from_json(json: &str) -> Result<Self> {
        let urls: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(SiteError::Manifest)?;
        Ok(Self { urls })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_json(&json)?;
        log::debug!("loaded {} assets from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Every asset the page references, served from `base`.
    pub fn bundled(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        let mut registry = Self::new();
        for key in crate::content::referenced_assets() {
            registry.insert(key, format!("{base}/{key}"));
        }
        registry
    }

    pub fn insert(&mut self, key: impl Into<String>, url: impl Into<String>) -> Option<String> {
        self.urls.insert(key.into(), url.into())
    }

    pub fn with(mut self, key: impl Into<String>, url: impl Into<String>) -> Self {
        self.insert(key, url);
        self
    }

    /// Entries from `other` win on conflicts.
    pub fn extend(&mut self, other: AssetRegistry) {
        self.urls.extend(other.urls);
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn resolve(&self, key: Option<&str>) -> Option<&str> {
        let key = key?;
        let url = self.urls.get(key).map(String::as_str);
        if url.is_none() {
            log::debug!("asset '{key}' not in registry; skipping");
        }
        url
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.urls.keys().map(String::as_str)
    }
}
