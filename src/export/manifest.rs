/*!
 * JSON manifest exporter.
 *
 * Writes the ordered clip list instead of rendering video. Useful when ffmpeg
 * is not installed or when the clips are assembled by another tool.
 */

use async_trait::async_trait;
use chrono::{DateTime, Local};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ExportError;
use crate::gloss::{Asset, AssetKind};

use super::{ensure_parent_dir, ClipExporter};

/// One entry of the manifest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManifestClip {
    pub index: usize,
    pub path: PathBuf,
    pub kind: AssetKind,
}

/// On-disk manifest layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportManifest {
    pub created_at: DateTime<Local>,
    pub clip_count: usize,
    pub clips: Vec<ManifestClip>,
}

impl ExportManifest {
    pub fn from_assets(assets: &[Asset]) -> Self {
        let clips = assets
            .iter()
            .enumerate()
            .map(|(index, asset)| ManifestClip {
                index,
                path: asset.path.clone(),
                kind: asset.kind,
            })
            .collect::<Vec<_>>();

        Self {
            created_at: Local::now(),
            clip_count: clips.len(),
            clips,
        }
    }

    /// Read a manifest back from disk
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Writes an `ExportManifest` as pretty-printed JSON
#[derive(Debug, Clone, Default)]
pub struct ManifestExporter;

impl ManifestExporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClipExporter for ManifestExporter {
    async fn export(&self, assets: &[Asset], destination: &Path) -> Result<PathBuf, ExportError> {
        if assets.is_empty() {
            return Err(ExportError::NoAssets);
        }
        ensure_parent_dir(destination)?;

        let manifest = ExportManifest::from_assets(assets);
        let json = serde_json::to_string_pretty(&manifest)?;
        tokio::fs::write(destination, json)
            .await
            .map_err(|source| ExportError::Io {
                path: destination.to_path_buf(),
                source,
            })?;

        info!("Wrote manifest with {} clips to {:?}", manifest.clip_count, destination);
        Ok(destination.to_path_buf())
    }

    fn name(&self) -> &str {
        "manifest"
    }

    fn extension(&self) -> &str {
        "json"
    }
}
