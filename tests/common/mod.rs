/*!
 * Common test utilities for the signgloss test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use signgloss::app_config::{Config, ExporterKind};
use signgloss::gloss::{Asset, GlossEngine, Vocabulary, VocabularySources};

// Re-export the mock exporter module
pub mod mock_exporter;

/// Install a test logger once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// In-memory vocabulary with one fake clip per word
pub fn vocabulary(words: &[&str]) -> Vocabulary {
    Vocabulary::from_entries(
        words
            .iter()
            .map(|w| (*w, Asset::new(format!("/clips/{}.mp4", w.replace(' ', "_"))))),
    )
}

/// In-memory vocabulary plus single-letter image entries
pub fn vocabulary_with_letters(words: &[&str], letters: &str) -> Vocabulary {
    let mut entries: Vec<(String, Asset)> = words
        .iter()
        .map(|w| (w.to_string(), Asset::new(format!("/clips/{}.mp4", w.replace(' ', "_")))))
        .collect();
    entries.extend(
        letters
            .chars()
            .map(|c| (c.to_string(), Asset::new(format!("/letters/{}/1.jpg", c)))),
    );
    Vocabulary::from_entries(entries)
}

/// Engine over an in-memory vocabulary
pub fn engine(words: &[&str]) -> GlossEngine {
    GlossEngine::new(Arc::new(vocabulary(words))).expect("fixture vocabulary is not empty")
}

/// On-disk dataset laid out like the processed WLASL release:
/// a class list, an association table, numbered clips, named clips and
/// per-letter image folders.
pub struct DatasetFixture {
    pub dir: TempDir,
    signs: Vec<String>,
    named_clips: Vec<String>,
    letters: Vec<char>,
}

impl DatasetFixture {
    pub fn new(signs: &[&str]) -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
            signs: signs.iter().map(|s| s.to_string()).collect(),
            named_clips: Vec::new(),
            letters: Vec::new(),
        }
    }

    /// Add clips named after their phrase (`thank_you.mp4`)
    pub fn with_named_clips(mut self, names: &[&str]) -> Self {
        self.named_clips = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Add letter folders with one image each
    pub fn with_letters(mut self, letters: &str) -> Self {
        self.letters = letters.chars().collect();
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn videos_dir(&self) -> PathBuf {
        self.root().join("videos")
    }

    pub fn letters_dir(&self) -> PathBuf {
        self.root().join("letters")
    }

    /// Write everything to disk.
    ///
    /// Sign `i` gets class id `i` and clip `<i + 1>` (zero-padded), plus a
    /// record pointing at a missing clip first so the lookup has to skip it.
    pub fn write(self) -> Result<Self> {
        let videos = self.videos_dir();
        fs::create_dir_all(&videos)?;

        let mut class_list = String::new();
        let mut association = serde_json::Map::new();
        for (i, sign) in self.signs.iter().enumerate() {
            class_list.push_str(&format!("{} {}\n", i, sign));

            let missing_id = 90000 + i;
            association.insert(
                format!("{:05}", missing_id),
                serde_json::json!({ "subset": "train", "action": [i, 1, 40] }),
            );

            let clip_id = i + 1;
            association.insert(
                format!("{:05}", clip_id),
                serde_json::json!({ "subset": "train", "action": [i, 1, 40] }),
            );
            fs::write(videos.join(format!("{:05}.mp4", clip_id)), b"clip")?;
        }
        fs::write(self.root().join("wlasl_class_list.txt"), class_list)?;
        fs::write(
            self.root().join("nslt_2000.json"),
            serde_json::to_string_pretty(&serde_json::Value::Object(association))?,
        )?;

        for name in &self.named_clips {
            fs::write(videos.join(format!("{}.mp4", name.replace(' ', "_"))), b"clip")?;
        }

        for letter in &self.letters {
            let dir = self.letters_dir().join(letter.to_string());
            fs::create_dir_all(&dir)?;
            fs::write(dir.join("1.jpg"), b"img")?;
        }

        Ok(self)
    }

    /// Vocabulary sources pointing into the fixture
    pub fn sources(&self) -> VocabularySources {
        let sources = VocabularySources::from_dataset_root(self.root());
        if self.letters.is_empty() {
            sources
        } else {
            sources.with_letters(self.letters_dir(), Default::default())
        }
    }

    /// Configuration using the fixture and the manifest exporter
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.dataset.root = self.root().to_path_buf();
        if !self.letters.is_empty() {
            config.dataset.letters_dir = Some(self.letters_dir());
        }
        config.export.exporter = ExporterKind::Manifest;
        config.export.output_dir = self.root().join("out");
        config
    }
}
