// ABOUTME: Layout persistence between runs.
// ABOUTME: Stores the JSON snapshot under the user's state directory, keyed by format and cache version.

use std::path::{Path, PathBuf};

use dock_core::WindowMetrics;

use crate::layout::Layout;
use crate::snapshot::LayoutSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutCache {
    path: PathBuf,
}

impl LayoutCache {
    pub const FORMAT_VERSION: u32 = 1;

    /// Cache file for `cache_version` under the state directory
    /// (~/.local/state/dockgrid/layout-1-<cache_version>.json)
    pub fn new(cache_version: &str) -> Result<Self, CacheError> {
        Self::default_path(cache_version)
            .map(Self::at)
            .ok_or(CacheError::NoStatePath)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path(cache_version: &str) -> Option<PathBuf> {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|p| p.join("dockgrid").join(Self::file_name(cache_version)))
    }

    pub fn file_name(cache_version: &str) -> String {
        format!("layout-{}-{}.json", Self::FORMAT_VERSION, cache_version)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, layout: &Layout) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(&layout.snapshot())?;
        std::fs::write(&self.path, json)?;
        tracing::debug!("Saved layout to {:?}", self.path);
        Ok(())
    }

    /// `Ok(None)` when no layout has been stored yet
    pub fn try_load(&self, metrics: WindowMetrics) -> Result<Option<Layout>, CacheError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let snapshot: Option<LayoutSnapshot> = serde_json::from_slice(&bytes)?;
        let Some(snapshot) = snapshot else {
            return Ok(None);
        };
        let layout = snapshot
            .into_layout(metrics)
            .map_err(|err| CacheError::Invalid(err.to_string()))?;
        Ok(Some(layout))
    }

    /// Stored layout, or `None` if it is missing or unreadable
    pub fn load(&self, metrics: WindowMetrics) -> Option<Layout> {
        match self.try_load(metrics) {
            Ok(layout) => layout,
            Err(err) => {
                tracing::warn!("Ignoring cached layout {:?}: {}", self.path, err);
                None
            }
        }
    }

    pub fn load_or_default(&self, metrics: WindowMetrics) -> Layout {
        self.load(metrics.clone())
            .unwrap_or_else(|| Layout::with_metrics(Vec::new(), metrics))
    }

    /// Delete the cache file
    pub fn clear(&self) -> Result<(), CacheError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine state directory")]
    NoStatePath,

    #[error("Stored layout is invalid: {0}")]
    Invalid(String),
}
