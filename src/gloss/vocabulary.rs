/*!
 * Sign vocabulary index.
 *
 * Builds the phrase → asset mapping from the dataset metadata:
 * - a class list (`<class id> <phrase words...>` per line)
 * - an association table (JSON object of clip id → record with an `action` list)
 * - the clip directory, scanned for manually named supplementary clips
 * - an optional letter directory (`<letters>/<char>/<image>`) used for fingerspelling
 *
 * The resulting `Vocabulary` is immutable; a new one is built for a reload.
 */

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use rand::seq::IndexedRandom;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::VocabularyError;

/// Extension of dataset clips
pub const CLIP_EXTENSION: &str = "mp4";

/// Dataset clips are named by their zero-padded numeric id
static NUMBERED_CLIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}\.mp4$").unwrap());

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

/// Kind of visual asset backing a gloss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Video,
    Image,
}

impl AssetKind {
    /// Detect the kind from a file extension, defaulting to video
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Self::Image
        } else {
            Self::Video
        }
    }
}

/// A renderable asset (video clip or still image)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub path: PathBuf,
    pub kind: AssetKind,
}

impl Asset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = AssetKind::from_path(&path);
        Self { path, kind }
    }
}

/// How letter images are picked when a letter folder holds several
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LetterSelection {
    /// First image by file name
    #[default]
    First,
    /// Any image, chosen at random
    Random,
}

/// Locations of the metadata the vocabulary is built from
#[derive(Debug, Clone)]
pub struct VocabularySources {
    pub class_list: PathBuf,
    pub association: PathBuf,
    pub videos_dir: PathBuf,
    pub letters_dir: Option<PathBuf>,
    pub letter_selection: LetterSelection,
}

impl VocabularySources {
    /// Sources laid out the way the processed WLASL dataset ships
    pub fn from_dataset_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            class_list: root.join("wlasl_class_list.txt"),
            association: root.join("nslt_2000.json"),
            videos_dir: root.join("videos"),
            letters_dir: None,
            letter_selection: LetterSelection::First,
        }
    }

    pub fn with_letters(mut self, letters_dir: impl Into<PathBuf>, selection: LetterSelection) -> Self {
        self.letters_dir = Some(letters_dir.into());
        self.letter_selection = selection;
        self
    }
}

/// Counts of where entries came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VocabularyStats {
    pub dataset: usize,
    pub supplementary: usize,
    pub letters: usize,
}

/// Immutable phrase → asset mapping
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: HashMap<String, Asset>,
    /// Keys in insertion order
    order: Vec<String>,
    max_phrase_len: usize,
    stats: VocabularyStats,
}

impl Vocabulary {
    /// Build the vocabulary from dataset metadata and asset directories.
    ///
    /// Missing metadata is a configuration error; an empty result is reported
    /// separately as `VocabularyError::Empty`.
    pub fn build(sources: &VocabularySources) -> Result<Self, VocabularyError> {
        if !sources.videos_dir.is_dir() {
            return Err(VocabularyError::configuration(
                &sources.videos_dir,
                "clip directory does not exist",
            ));
        }

        let class_content = read_source(&sources.class_list)?;
        let association_content = read_source(&sources.association)?;

        let phrase_classes = parse_class_list(&class_content);
        let class_clips = parse_association(&association_content)
            .map_err(|e| VocabularyError::configuration(&sources.association, e))?;

        let mut vocabulary = Self::default();

        // 1) dataset clips, first existing clip of the class wins
        for (phrase, class_id) in &phrase_classes {
            let Some(clip_ids) = class_clips.get(class_id) else {
                continue;
            };
            for clip_id in clip_ids {
                let path = sources.videos_dir.join(format!("{:05}.{}", clip_id, CLIP_EXTENSION));
                if path.is_file() {
                    if vocabulary.insert_if_absent(phrase, Asset::new(path)) {
                        vocabulary.stats.dataset += 1;
                    }
                    break;
                }
            }
        }

        // 2) manually named clips never override dataset clips
        for (key, path) in scan_named_clips(&sources.videos_dir) {
            if vocabulary.insert_if_absent(&key, Asset::new(path)) {
                vocabulary.stats.supplementary += 1;
            }
        }

        // 3) fingerspelling images
        if let Some(letters_dir) = &sources.letters_dir {
            if letters_dir.is_dir() {
                for (letter, path) in scan_letter_images(letters_dir, sources.letter_selection) {
                    if vocabulary.insert_if_absent(&letter, Asset::new(path)) {
                        vocabulary.stats.letters += 1;
                    }
                }
            } else {
                warn!("Letter directory not found: {:?}", letters_dir);
            }
        }

        if vocabulary.is_empty() {
            return Err(VocabularyError::Empty {
                root: sources.videos_dir.clone(),
            });
        }

        info!(
            "Loaded {} signs ({} dataset, {} named, {} letters)",
            vocabulary.len(),
            vocabulary.stats.dataset,
            vocabulary.stats.supplementary,
            vocabulary.stats.letters
        );

        Ok(vocabulary)
    }

    /// Build a vocabulary from in-memory pairs; earlier pairs win on duplicate keys
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Asset)>,
        K: AsRef<str>,
    {
        let mut vocabulary = Self::default();
        for (key, asset) in entries {
            if vocabulary.insert_if_absent(key.as_ref(), asset) {
                vocabulary.stats.dataset += 1;
            }
        }
        vocabulary
    }

    fn insert_if_absent(&mut self, key: &str, asset: Asset) -> bool {
        let key = normalize_key(key);
        if key.is_empty() || self.entries.contains_key(&key) {
            return false;
        }

        self.max_phrase_len = self.max_phrase_len.max(key.split(' ').count());
        self.order.push(key.clone());
        self.entries.insert(key, asset);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Asset> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in the order they were discovered
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Longest key, in words; 1 for an empty vocabulary
    pub fn max_phrase_len(&self) -> usize {
        self.max_phrase_len.max(1)
    }

    /// Multi-word keys containing an apostrophe (fixed idioms such as "don't want")
    pub fn apostrophe_phrases(&self) -> impl Iterator<Item = &str> {
        self.keys().filter(|k| k.contains('\'') && k.contains(' '))
    }

    pub fn stats(&self) -> VocabularyStats {
        self.stats
    }
}

/// Lowercase and collapse whitespace to single spaces
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn read_source(path: &Path) -> Result<String, VocabularyError> {
    if !path.is_file() {
        return Err(VocabularyError::configuration(path, "file does not exist"));
    }
    fs::read_to_string(path).map_err(|e| VocabularyError::configuration(path, e.to_string()))
}

/// Parse the class list into (phrase, class id) pairs in file order.
///
/// A phrase listed twice keeps its first position and takes the later id.
pub fn parse_class_list(content: &str) -> Vec<(String, u64)> {
    let mut phrases: Vec<(String, u64)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (line_no, line) in content.lines().enumerate() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            continue;
        }
        let Ok(class_id) = parts[0].parse::<u64>() else {
            warn!("Skipping class list line {}: invalid class id {:?}", line_no + 1, parts[0]);
            continue;
        };
        let phrase = parts[1..].join(" ").to_lowercase();

        match positions.get(&phrase) {
            Some(&idx) => phrases[idx].1 = class_id,
            None => {
                positions.insert(phrase.clone(), phrases.len());
                phrases.push((phrase, class_id));
            }
        }
    }

    phrases
}

/// Group clip ids by the first class each record declares.
///
/// Records without a usable `action` list are skipped.
pub fn parse_association(content: &str) -> Result<HashMap<u64, Vec<u64>>, String> {
    let records: serde_json::Map<String, Value> =
        serde_json::from_str(content).map_err(|e| format!("invalid association table: {}", e))?;

    let mut class_clips: HashMap<u64, Vec<u64>> = HashMap::new();
    for (clip, record) in &records {
        let class_id = record
            .get("action")
            .and_then(Value::as_array)
            .and_then(|action| action.first())
            .and_then(as_integer);

        let Some(class_id) = class_id else {
            debug!("Skipping clip {}: no class reference", clip);
            continue;
        };
        let Ok(clip_id) = clip.trim().parse::<u64>() else {
            debug!("Skipping clip {:?}: id is not numeric", clip);
            continue;
        };

        class_clips.entry(class_id).or_default().push(clip_id);
    }

    Ok(class_clips)
}

fn as_integer(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Clips in the directory that do not follow the numeric naming, keyed by phrase
fn scan_named_clips(dir: &Path) -> Vec<(String, PathBuf)> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            let is_clip = entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(CLIP_EXTENSION));
            if !is_clip || NUMBERED_CLIP.is_match(&name) {
                return None;
            }
            let stem = entry.path().file_stem()?.to_string_lossy().replace('_', " ");
            Some((normalize_key(&stem), entry.path().to_path_buf()))
        })
        .collect()
}

/// One image per single-character folder of the letter directory
fn scan_letter_images(dir: &Path, selection: LetterSelection) -> Vec<(String, PathBuf)> {
    let mut letters = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
    {
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.chars().count() != 1 {
            continue;
        }

        let images: Vec<PathBuf> = WalkDir::new(entry.path())
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().to_path_buf())
            .filter(|p| AssetKind::from_path(p) == AssetKind::Image)
            .collect();

        let picked = match selection {
            LetterSelection::First => images.first(),
            LetterSelection::Random => images.choose(&mut rand::rng()),
        };

        if let Some(path) = picked {
            letters.push((name, path.clone()));
        }
    }

    letters
}
