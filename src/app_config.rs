use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::gloss::{
    FuzzyMatcher, LetterSelection, ScorerKind, VocabularySources, DEFAULT_COVERAGE_THRESHOLD,
    DEFAULT_FUZZY_CUTOFF,
};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Dataset locations
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Gloss engine tuning
    #[serde(default)]
    pub engine: EngineConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Batch settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Where the sign dataset lives
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatasetConfig {
    // @field: Dataset root; relative entries below are resolved against it
    #[serde(default = "default_dataset_root")]
    pub root: PathBuf,

    // @field: Class list file (`<id> <phrase>` per line)
    #[serde(default = "default_class_list")]
    pub class_list: PathBuf,

    // @field: Clip/class association JSON
    #[serde(default = "default_association")]
    pub association: PathBuf,

    // @field: Clip directory
    #[serde(default = "default_videos_dir")]
    pub videos_dir: PathBuf,

    // @field: Optional per-letter image directory
    #[serde(default)]
    pub letters_dir: Option<PathBuf>,

    // @field: Which image to use when a letter has several
    #[serde(default)]
    pub letter_selection: LetterSelection,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            root: default_dataset_root(),
            class_list: default_class_list(),
            association: default_association(),
            videos_dir: default_videos_dir(),
            letters_dir: None,
            letter_selection: LetterSelection::default(),
        }
    }
}

impl DatasetConfig {
    /// Vocabulary sources with every path resolved against `root`
    pub fn sources(&self) -> VocabularySources {
        let resolve = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                self.root.join(p)
            }
        };

        let sources = VocabularySources {
            class_list: resolve(&self.class_list),
            association: resolve(&self.association),
            videos_dir: resolve(&self.videos_dir),
            letters_dir: None,
            letter_selection: self.letter_selection,
        };

        match &self.letters_dir {
            Some(dir) => sources.with_letters(resolve(dir), self.letter_selection),
            None => sources,
        }
    }
}

/// Gloss engine tuning
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    // @field: Coverage below this fraction is reported as partial
    #[serde(default = "default_coverage_threshold")]
    pub coverage_threshold: f32,

    // @field: Minimum similarity for a fuzzy match
    #[serde(default = "default_fuzzy_cutoff")]
    pub fuzzy_cutoff: f32,

    // @field: Similarity measure for fuzzy matching
    #[serde(default)]
    pub scorer: ScorerKind,

    // @field: Optional JSON file of manual gloss overrides
    #[serde(default)]
    pub overrides_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            coverage_threshold: default_coverage_threshold(),
            fuzzy_cutoff: default_fuzzy_cutoff(),
            scorer: ScorerKind::default(),
            overrides_path: None,
        }
    }
}

impl EngineConfig {
    pub fn fuzzy_matcher(&self) -> FuzzyMatcher {
        FuzzyMatcher::from_kind(self.scorer, self.fuzzy_cutoff)
    }
}

/// Exporter type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExporterKind {
    // @exporter: ffmpeg concatenation into one video
    #[default]
    Ffmpeg,
    // @exporter: JSON clip list
    Manifest,
}

impl ExporterKind {
    // @returns: Lowercase exporter identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Ffmpeg => "ffmpeg".to_string(),
            Self::Manifest => "manifest".to_string(),
        }
    }
}

impl std::fmt::Display for ExporterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for ExporterKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ffmpeg" => Ok(Self::Ffmpeg),
            "manifest" => Ok(Self::Manifest),
            _ => Err(anyhow!("Invalid exporter type: {}", s)),
        }
    }
}

/// Export settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default)]
    pub exporter: ExporterKind,

    // @field: Directory for automatically named artifacts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    #[serde(default = "default_codec")]
    pub codec: String,

    #[serde(default = "default_fps")]
    pub fps: u32,

    // @field: How long a still image (letter) is shown
    #[serde(default = "default_image_duration_secs")]
    pub image_duration_secs: f32,

    // @field: Output frame size every clip is scaled and padded to; 640x480 unless both are set
    #[serde(default)]
    pub frame_width: Option<u32>,

    #[serde(default)]
    pub frame_height: Option<u32>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            exporter: ExporterKind::default(),
            output_dir: default_output_dir(),
            ffmpeg_path: default_ffmpeg_path(),
            codec: default_codec(),
            fps: default_fps(),
            image_duration_secs: default_image_duration_secs(),
            frame_width: None,
            frame_height: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Batch settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchConfig {
    #[serde(default = "default_concurrent_translations")]
    pub concurrent_translations: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrent_translations: default_concurrent_translations(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_dataset_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cache/kagglehub/datasets/risangbaskoro/wlasl-processed/versions/5")
}

fn default_class_list() -> PathBuf {
    PathBuf::from("wlasl_class_list.txt")
}

fn default_association() -> PathBuf {
    PathBuf::from("nslt_2000.json")
}

fn default_videos_dir() -> PathBuf {
    PathBuf::from("videos")
}

fn default_coverage_threshold() -> f32 {
    DEFAULT_COVERAGE_THRESHOLD
}

fn default_fuzzy_cutoff() -> f32 {
    DEFAULT_FUZZY_CUTOFF
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("asl_outputs")
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_codec() -> String {
    "libx264".to_string()
}

fn default_fps() -> u32 {
    25
}

fn default_image_duration_secs() -> f32 {
    0.8
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_concurrent_translations() -> usize {
    4
}

impl Config {
    /// Load the configuration from `path`, writing a default one if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {:?}", path))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let unit = 0.0..=1.0;
        if !unit.contains(&self.engine.coverage_threshold) {
            return Err(anyhow!(
                "coverage_threshold must be within [0, 1], got {}",
                self.engine.coverage_threshold
            ));
        }
        if !unit.contains(&self.engine.fuzzy_cutoff) {
            return Err(anyhow!(
                "fuzzy_cutoff must be within [0, 1], got {}",
                self.engine.fuzzy_cutoff
            ));
        }

        if self.export.fps == 0 {
            return Err(anyhow!("fps must be greater than zero"));
        }
        if !(self.export.image_duration_secs > 0.0) {
            return Err(anyhow!(
                "image_duration_secs must be positive, got {}",
                self.export.image_duration_secs
            ));
        }
        if self.export.frame_width.is_some() != self.export.frame_height.is_some() {
            warn!("Only one of frame_width/frame_height is set; using the default 640x480 frame");
        }
        if matches!(self.export.frame_width, Some(0)) || matches!(self.export.frame_height, Some(0)) {
            return Err(anyhow!("frame size must be greater than zero"));
        }

        if self.batch.concurrent_translations == 0 {
            return Err(anyhow!("concurrent_translations must be greater than zero"));
        }

        Ok(())
    }
}
