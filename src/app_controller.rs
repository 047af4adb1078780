use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::export::{create_exporter, ClipExporter, FfmpegExporter};
use crate::file_utils::FileManager;
use crate::gloss::{
    BatchJob, BatchReport, BatchTranslator, GlossEngine, GlossPlan, ManualOverrideTable,
    TranslationOutcome, Vocabulary, VocabularyStore, vocabulary::CLIP_EXTENSION,
};

// @module: Application controller for gloss translation

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Vocabulary, built on first use
    store: OnceCell<VocabularyStore>,

    // @field: Manual gloss overrides
    overrides: Arc<ManualOverrideTable>,

    // @field: Selected exporter
    exporter: Arc<dyn ClipExporter>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let overrides = match &config.engine.overrides_path {
            Some(path) => ManualOverrideTable::load(path)
                .with_context(|| format!("Failed to load manual overrides from {:?}", path))?,
            None => ManualOverrideTable::new(),
        };
        let exporter = create_exporter(&config.export);

        Ok(Self {
            config,
            store: OnceCell::new(),
            overrides: Arc::new(overrides),
            exporter,
        })
    }

    /// Replace the exporter chosen by the configuration
    pub fn with_exporter(mut self, exporter: Arc<dyn ClipExporter>) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Vocabulary store, building the vocabulary on first access
    pub fn store(&self) -> Result<&VocabularyStore> {
        self.store.get_or_try_init(|| {
            let start_time = Instant::now();
            let store = VocabularyStore::load(self.config.dataset.sources())
                .context("Failed to build the sign vocabulary")?;
            info!(
                "Vocabulary ready: {} signs in {}",
                store.snapshot().len(),
                Self::format_duration(start_time.elapsed())
            );
            Ok(store)
        })
    }

    /// Current vocabulary snapshot
    pub fn vocabulary(&self) -> Result<Arc<Vocabulary>> {
        Ok(self.store()?.snapshot())
    }

    /// Rebuild the vocabulary from disk; the old one stays active on failure
    pub fn reload_vocabulary(&self) -> Result<usize> {
        let size = self.store()?.reload().context("Vocabulary reload failed")?;
        Ok(size)
    }

    /// Engine over the current snapshot with the configured tuning
    pub fn engine(&self) -> Result<GlossEngine> {
        let engine = GlossEngine::new(self.vocabulary()?)?
            .with_overrides(Arc::clone(&self.overrides))
            .with_fuzzy(self.config.engine.fuzzy_matcher())
            .with_threshold(self.config.engine.coverage_threshold);
        Ok(engine)
    }

    /// Glosses, resolution details and coverage without exporting
    pub fn gloss_phrase(&self, phrase: &str) -> Result<GlossPlan> {
        Ok(self.engine()?.plan(phrase)?)
    }

    /// Translate one phrase; without `output` the artifact is named automatically
    pub async fn translate_phrase(&self, phrase: &str, output: Option<PathBuf>) -> Result<TranslationOutcome> {
        let engine = self.engine()?;
        let destination = self.destination_for(phrase, output);

        let spinner = Self::spinner(&format!("Rendering with {}", self.exporter.name()));
        let result = engine.translate(phrase, self.exporter.as_ref(), &destination).await;
        spinner.finish_and_clear();

        let outcome = result?;
        info!("Success: {}", outcome.artifact.display());
        Ok(outcome)
    }

    /// Fingerspell text letter by letter
    pub async fn spell(&self, text: &str, output: Option<PathBuf>) -> Result<TranslationOutcome> {
        let engine = self.engine()?;
        let destination = self.destination_for(text, output);

        let spinner = Self::spinner("Fingerspelling");
        let result = engine.spell(text, self.exporter.as_ref(), &destination).await;
        spinner.finish_and_clear();

        let outcome = result?;
        info!("Success: {}", outcome.artifact.display());
        Ok(outcome)
    }

    /// Translate every phrase of a file concurrently
    pub async fn run_batch_file(&self, path: &Path) -> Result<BatchReport> {
        let phrases = FileManager::read_phrases(path)?;
        if phrases.is_empty() {
            return Err(anyhow!("No phrases found in {:?}", path));
        }
        self.run_batch(phrases).await
    }

    /// Translate phrases concurrently, bounded by `batch.concurrent_translations`
    pub async fn run_batch(&self, phrases: Vec<String>) -> Result<BatchReport> {
        let start_time = Instant::now();
        let engine = self.engine()?;
        let output_dir = &self.config.export.output_dir;

        // timestamps alone collide within a batch, so prefix the position
        let jobs: Vec<BatchJob> = phrases
            .into_iter()
            .enumerate()
            .map(|(i, phrase)| {
                let path = FileManager::generate_output_path(output_dir, &phrase, self.exporter.extension());
                let name = path
                    .file_name()
                    .map(|n| format!("{:03}_{}", i + 1, n.to_string_lossy()))
                    .unwrap_or_else(|| format!("{:03}", i + 1));
                BatchJob {
                    destination: output_dir.join(name),
                    phrase,
                }
            })
            .collect();

        let progress_bar = ProgressBar::new(jobs.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} phrases ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let translator = BatchTranslator::new(
            engine,
            Arc::clone(&self.exporter),
            self.config.batch.concurrent_translations,
        );
        let pb = progress_bar.clone();
        let report = translator
            .translate_all(&jobs, move |done, _total| pb.set_position(done as u64))
            .await;
        progress_bar.finish_and_clear();

        info!(
            "Batch: {} of {} phrases translated in {} (mean coverage {:.1}%)",
            report.succeeded(),
            report.items.len(),
            Self::format_duration(start_time.elapsed()),
            report.mean_coverage() * 100.0
        );
        Ok(report)
    }

    /// Inspect the dataset layout and tooling without failing
    pub async fn check_setup(&self) -> SetupReport {
        let sources = self.config.dataset.sources();

        let clip_count = FileManager::find_files(&sources.videos_dir, CLIP_EXTENSION)
            .map(|files| files.len())
            .unwrap_or(0);
        let letters = sources.letters_dir.as_ref().map(|dir| LetterCheck {
            path: dir.clone(),
            present: FileManager::dir_exists(dir),
            letter_dirs: FileManager::count_subdirs(dir),
        });

        let (vocabulary_size, vocabulary_error) = match self.vocabulary() {
            Ok(vocabulary) => (Some(vocabulary.len()), None),
            Err(e) => {
                debug!("Vocabulary check failed: {:#}", e);
                (None, Some(format!("{:#}", e)))
            }
        };

        let ffmpeg_available = FfmpegExporter::from_config(&self.config.export)
            .is_available()
            .await;

        SetupReport {
            class_list: PathCheck::file(&sources.class_list),
            association: PathCheck::file(&sources.association),
            videos_dir: PathCheck::dir(&sources.videos_dir),
            clip_count,
            letters,
            vocabulary_size,
            vocabulary_error,
            ffmpeg_available,
        }
    }

    fn destination_for(&self, phrase: &str, output: Option<PathBuf>) -> PathBuf {
        output.unwrap_or_else(|| {
            FileManager::generate_output_path(&self.config.export.output_dir, phrase, self.exporter.extension())
        })
    }

    fn spinner(message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

/// Presence of one dataset path
#[derive(Debug, Clone, Serialize)]
pub struct PathCheck {
    pub path: PathBuf,
    pub present: bool,
}

impl PathCheck {
    fn file(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            present: FileManager::file_exists(path),
        }
    }

    fn dir(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            present: FileManager::dir_exists(path),
        }
    }
}

/// Letter image directory status
#[derive(Debug, Clone, Serialize)]
pub struct LetterCheck {
    pub path: PathBuf,
    pub present: bool,
    pub letter_dirs: usize,
}

/// Result of `Controller::check_setup`
#[derive(Debug, Clone, Serialize)]
pub struct SetupReport {
    pub class_list: PathCheck,
    pub association: PathCheck,
    pub videos_dir: PathCheck,
    pub clip_count: usize,
    pub letters: Option<LetterCheck>,
    pub vocabulary_size: Option<usize>,
    pub vocabulary_error: Option<String>,
    pub ffmpeg_available: bool,
}

impl SetupReport {
    /// Everything needed for a translation is in place
    pub fn is_ready(&self) -> bool {
        self.vocabulary_size.is_some_and(|n| n > 0)
    }

    /// Rendering video additionally needs ffmpeg
    pub fn can_render_video(&self) -> bool {
        self.is_ready() && self.ffmpeg_available
    }
}

impl fmt::Display for SetupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |ok: bool| if ok { "ok" } else { "missing" };

        writeln!(f, "class list:   {} ({})", mark(self.class_list.present), self.class_list.path.display())?;
        writeln!(f, "association:  {} ({})", mark(self.association.present), self.association.path.display())?;
        writeln!(
            f,
            "videos:       {} ({}, {} clips)",
            mark(self.videos_dir.present),
            self.videos_dir.path.display(),
            self.clip_count
        )?;
        match &self.letters {
            Some(letters) => writeln!(
                f,
                "letters:      {} ({}, {} letters)",
                mark(letters.present),
                letters.path.display(),
                letters.letter_dirs
            )?,
            None => writeln!(f, "letters:      not configured")?,
        }
        match (&self.vocabulary_size, &self.vocabulary_error) {
            (Some(size), _) => writeln!(f, "vocabulary:   {} signs", size)?,
            (None, Some(error)) => writeln!(f, "vocabulary:   unavailable ({})", error)?,
            (None, None) => writeln!(f, "vocabulary:   unavailable")?,
        }
        write!(f, "ffmpeg:       {}", mark(self.ffmpeg_available))
    }
}
