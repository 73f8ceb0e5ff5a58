use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::assets::AssetRegistry;
use crate::error::{Result, SiteError};

/// Page-level settings. Every field has a default, so a JSON options file
/// only needs the keys it changes:
///
/// ```json
/// { "viewport_height": 720, "assets": { "pryce.png": "/cdn/pryce.png" } }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageOptions {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub frame_interval_ms: u64,
    /// Base URL for the bundled asset set; `None` starts from an empty registry.
    pub asset_base: Option<String>,
    /// JSON manifest merged over the bundled set.
    pub asset_manifest: Option<PathBuf>,
    /// Inline entries, applied last.
    pub assets: BTreeMap<String, String>,
    /// Year shown in the footer; omitted when unset.
    pub copyright_year: Option<i32>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 800.0,
            frame_interval_ms: 16,
            asset_base: Some("/assets".into()),
            asset_manifest: None,
            assets: BTreeMap::new(),
            copyright_year: None,
        }
    }
}

impl PageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(SiteError::Options)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn frame_interval_ms(mut self, ms: u64) -> Self {
        self.frame_interval_ms = ms;
        self
    }

    pub fn asset_base(mut self, base: Option<&str>) -> Self {
        self.asset_base = base.map(str::to_owned);
        self
    }

    pub fn asset_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.asset_manifest = Some(path.into());
        self
    }

    pub fn asset(mut self, key: impl Into<String>, url: impl Into<String>) -> Self {
        self.assets.insert(key.into(), url.into());
        self
    }

    pub fn copyright_year(mut self, year: i32) -> Self {
        self.copyright_year = Some(year);
        self
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    /// Bundled set, then the manifest file, then inline entries.
    pub fn load_assets(&self) -> Result<AssetRegistry> {
        let mut registry = match &self.asset_base {
            Some(base) => AssetRegistry::bundled(base),
            None => AssetRegistry::new(),
        };
        if let Some(path) = &self.asset_manifest {
            registry.extend(AssetRegistry::from_path(path)?);
        }
        for (key, url) in &self.assets {
            registry.insert(key.clone(), url.clone());
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let opts = PageOptions::from_json(r#"{ "viewport_height": 720 }"#).unwrap();
        assert_eq!(opts.viewport_height, 720.0);
        assert_eq!(opts.viewport_width, 1280.0);
        assert_eq!(opts.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn inline_assets_override_bundle() {
        let opts = PageOptions::new()
            .asset_base(Some("/a"))
            .asset("pryce.png", "/cdn/pryce.png");
        let assets = opts.load_assets().unwrap();
        assert_eq!(assets.resolve(Some("pryce.png")), Some("/cdn/pryce.png"));
        assert_eq!(assets.resolve(Some("UPC.png")), Some("/a/UPC.png"));
    }

    #[test]
    fn missing_manifest_is_an_io_error() {
        let opts = PageOptions::new().asset_manifest("/nonexistent/manifest.json");
        assert!(matches!(opts.load_assets(), Err(SiteError::Io { .. })));
    }

    #[test]
    fn bad_json_is_reported() {
        assert!(matches!(
            PageOptions::from_json("{ nope"),
            Err(SiteError::Options(_))
        ));
    }
}
