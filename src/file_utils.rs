use anyhow::{Context, Result};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Characters dropped from output file slugs
static SLUG_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Maximum slug length in characters
const SLUG_MAX_CHARS: usize = 30;

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @returns: Phrase slug for file names (punctuation removed, spaces → `_`)
    pub fn slugify(phrase: &str) -> String {
        let cleaned = SLUG_NOISE.replace_all(phrase.trim(), "");
        cleaned
            .chars()
            .take(SLUG_MAX_CHARS)
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect()
    }

    // @generates: `<output_dir>/asl_<slug>_<unix-timestamp>.<extension>`
    pub fn generate_output_path<P: AsRef<Path>>(output_dir: P, phrase: &str, extension: &str) -> PathBuf {
        let timestamp = Utc::now().timestamp();
        let file_name = format!(
            "asl_{}_{}.{}",
            Self::slugify(phrase),
            timestamp,
            extension.trim_start_matches('.')
        );
        output_dir.as_ref().join(file_name)
    }

    /// Find files with a specific extension directly inside a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let wanted = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
            {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Count the immediate subdirectories of `dir`
    pub fn count_subdirs<P: AsRef<Path>>(dir: P) -> usize {
        WalkDir::new(dir.as_ref())
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .count()
    }

    /// Read a text file
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Non-blank lines of a phrase file; lines starting with `#` are comments
    pub fn read_phrases<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let content = Self::read_to_string(path)?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }
}
