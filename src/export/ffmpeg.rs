/*!
 * ffmpeg-based clip concatenation.
 *
 * Every asset becomes its own ffmpeg input; still images are looped for a
 * fixed duration. Each input is scaled and padded to a common frame size,
 * resampled to the output frame rate, and the normalized streams are joined
 * with the `concat` filter in a single invocation. This lets clips of
 * different resolutions and rates be mixed with letter images.
 */

use async_trait::async_trait;
use log::{debug, error, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::process::Command;

use crate::app_config::ExportConfig;
use crate::errors::ExportError;
use crate::gloss::{Asset, AssetKind};

use super::{ensure_parent_dir, ClipExporter};

/// Output frame size used when none is configured
pub const DEFAULT_FRAME_SIZE: (u32, u32) = (640, 480);

/// Lines of ffmpeg stderr that carry no diagnostic value
const NOISE_PREFIXES: &[&str] = &[
    "ffmpeg version",
    "built with",
    "configuration:",
    "lib",
    "Input #",
    "Metadata:",
    "Duration:",
    "Stream #",
    "Output #",
    "Stream mapping:",
    "encoder",
    "major_brand",
    "minor_version",
    "compatible_brands",
    "handler_name",
    "frame=",
    "Press [q]",
];

/// Renders a translation into one video file
#[derive(Debug, Clone)]
pub struct FfmpegExporter {
    ffmpeg_path: String,
    codec: String,
    fps: u32,
    image_duration_secs: f32,
    frame_size: (u32, u32),
    timeout: Duration,
}

impl Default for FfmpegExporter {
    fn default() -> Self {
        Self::from_config(&ExportConfig::default())
    }
}

impl FfmpegExporter {
    pub fn from_config(config: &ExportConfig) -> Self {
        let frame_size = match (config.frame_width, config.frame_height) {
            (Some(w), Some(h)) => (w, h),
            _ => DEFAULT_FRAME_SIZE,
        };

        Self {
            ffmpeg_path: config.ffmpeg_path.clone(),
            codec: config.codec.clone(),
            fps: config.fps,
            image_duration_secs: config.image_duration_secs,
            frame_size,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_ffmpeg_path(mut self, path: impl Into<String>) -> Self {
        self.ffmpeg_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn frame_size(&self) -> (u32, u32) {
        self.frame_size
    }

    /// Check that the ffmpeg binary can be started
    pub async fn is_available(&self) -> bool {
        Command::new(&self.ffmpeg_path)
            .arg("-version")
            .output()
            .await
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    /// Input arguments for `assets`, one `-i` per asset in order.
    ///
    /// Images are looped for the configured duration so they yield a stream
    /// of frames instead of a single one.
    pub fn input_args(&self, assets: &[Asset]) -> Result<Vec<String>, ExportError> {
        let mut args = Vec::with_capacity(assets.len() * 5);

        for asset in assets {
            let absolute = std::path::absolute(&asset.path).map_err(|source| ExportError::Io {
                path: asset.path.clone(),
                source,
            })?;
            if asset.kind == AssetKind::Image {
                args.extend([
                    "-loop".to_string(),
                    "1".to_string(),
                    "-t".to_string(),
                    format!("{:.3}", self.image_duration_secs),
                ]);
            }
            args.push("-i".into());
            args.push(absolute.to_string_lossy().into_owned());
        }

        Ok(args)
    }

    /// Filter graph normalizing `inputs` streams and joining them into `[out]`
    pub fn filter_graph(&self, inputs: usize) -> String {
        let (w, h) = self.frame_size;
        let mut graph = String::new();

        for i in 0..inputs {
            graph.push_str(&format!(
                "[{i}:v]scale={w}:{h}:force_original_aspect_ratio=decrease,\
                 pad={w}:{h}:(ow-iw)/2:(oh-ih)/2,setsar=1,fps={fps},format=yuv420p[v{i}];\n",
                fps = self.fps
            ));
        }
        for i in 0..inputs {
            graph.push_str(&format!("[v{i}]"));
        }
        graph.push_str(&format!("concat=n={inputs}:v=1:a=0[out]"));
        graph
    }

    fn build_args(&self, inputs: Vec<String>, graph_path: &Path, destination: &Path) -> Vec<String> {
        let mut args: Vec<String> = vec!["-y".into(), "-hide_banner".into()];
        args.extend(inputs);
        args.extend([
            "-filter_complex_script".into(),
            graph_path.to_string_lossy().into_owned(),
            "-map".into(),
            "[out]".into(),
            "-r".into(),
            self.fps.to_string(),
            "-c:v".into(),
            self.codec.clone(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            "-an".into(),
            destination.to_string_lossy().into_owned(),
        ]);
        args
    }

    /// Filter ffmpeg stderr down to the lines describing the failure
    fn filter_ffmpeg_stderr(stderr: &str) -> String {
        let meaningful: Vec<&str> = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !NOISE_PREFIXES.iter().any(|p| line.starts_with(p)))
            .collect();

        if meaningful.is_empty() {
            "unknown ffmpeg error (stderr was empty after filtering)".to_string()
        } else {
            meaningful.join("\n")
        }
    }
}

#[async_trait]
impl ClipExporter for FfmpegExporter {
    async fn export(&self, assets: &[Asset], destination: &Path) -> Result<PathBuf, ExportError> {
        if assets.is_empty() {
            return Err(ExportError::NoAssets);
        }
        ensure_parent_dir(destination)?;

        let inputs = self.input_args(assets)?;
        let graph = self.filter_graph(assets.len());
        let temp_dir = std::env::temp_dir();
        let io_err = |source| ExportError::Io {
            path: temp_dir.clone(),
            source,
        };
        let mut graph_file = tempfile::Builder::new()
            .prefix("signgloss_filter_")
            .suffix(".txt")
            .tempfile()
            .map_err(io_err)?;
        graph_file.write_all(graph.as_bytes()).map_err(io_err)?;
        graph_file.flush().map_err(io_err)?;

        let output = self.run(inputs, &graph_file, destination).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = Self::filter_ffmpeg_stderr(&stderr);
            error!("Concatenation failed: {}", filtered);
            return Err(ExportError::ToolFailed {
                tool: self.ffmpeg_path.clone(),
                status: output.status.code().unwrap_or(-1),
                stderr: filtered,
            });
        }

        info!("Wrote {} assets to {:?}", assets.len(), destination);
        Ok(destination.to_path_buf())
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn extension(&self) -> &str {
        "mp4"
    }
}

impl FfmpegExporter {
    async fn run(
        &self,
        inputs: Vec<String>,
        graph_file: &NamedTempFile,
        destination: &Path,
    ) -> Result<std::process::Output, ExportError> {
        let args = self.build_args(inputs, graph_file.path(), destination);
        debug!("Running {} {}", self.ffmpeg_path, args.join(" "));

        let ffmpeg_future = Command::new(&self.ffmpeg_path)
            .args(&args)
            .kill_on_drop(true)
            .output();

        tokio::select! {
            result = ffmpeg_future => {
                result.map_err(|e| ExportError::Spawn {
                    tool: self.ffmpeg_path.clone(),
                    message: e.to_string(),
                })
            },
            _ = tokio::time::sleep(self.timeout) => {
                Err(ExportError::Timeout {
                    tool: self.ffmpeg_path.clone(),
                    secs: self.timeout.as_secs(),
                })
            }
        }
    }
}
