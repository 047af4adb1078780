/*!
 * Clip exporters.
 *
 * An exporter turns the ordered asset list of a translation into a single
 * artifact on disk:
 * - ffmpeg: concatenates clips and still images into one video
 * - manifest: writes the ordered clip list as JSON
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::{ExportConfig, ExporterKind};
use crate::errors::ExportError;
use crate::gloss::Asset;

pub mod ffmpeg;
pub mod manifest;

pub use ffmpeg::FfmpegExporter;
pub use manifest::ManifestExporter;

/// Common trait for the concatenation collaborator
///
/// Implementations must be usable from several concurrent translations.
#[async_trait]
pub trait ClipExporter: Send + Sync + Debug {
    /// Write `assets`, in order, to `destination` and return the artifact path
    ///
    /// # Arguments
    /// * `assets` - Ordered, non-empty list of clips and images
    /// * `destination` - Target path; parent directories are created
    async fn export(&self, assets: &[Asset], destination: &Path) -> Result<PathBuf, ExportError>;

    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// File extension of the produced artifact
    fn extension(&self) -> &str;
}

/// Create the exporter selected in the configuration
pub fn create_exporter(config: &ExportConfig) -> Arc<dyn ClipExporter> {
    match config.exporter {
        ExporterKind::Ffmpeg => Arc::new(FfmpegExporter::from_config(config)),
        ExporterKind::Manifest => Arc::new(ManifestExporter::new()),
    }
}

/// Create the parent directory of an artifact path
pub(crate) fn ensure_parent_dir(destination: &Path) -> Result<(), ExportError> {
    match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| ExportError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
