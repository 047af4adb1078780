/*!
 * Manual gloss overrides.
 *
 * A JSON object mapping a full lowercase phrase to a literal gloss sequence,
 * e.g. `{ "how are you": ["you", "how"] }`. An exact match bypasses every
 * algorithmic reordering step.
 */

use anyhow::{Context, Result};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Phrase → literal gloss sequence
#[derive(Debug, Clone, Default)]
pub struct ManualOverrideTable {
    entries: HashMap<String, Vec<String>>,
}

impl ManualOverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pairs; phrases are lowercased and whitespace-collapsed
    pub fn from_pairs<I, K, V, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(phrase, glosses)| {
                (
                    normalize_phrase(phrase.as_ref()),
                    glosses.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Load the table from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read override file: {:?}", path))?;
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse override file: {:?}", path))?;

        debug!("Loaded {} manual overrides from {:?}", raw.len(), path);
        Ok(Self::from_pairs(raw))
    }

    pub fn get(&self, phrase: &str) -> Option<&[String]> {
        self.entries.get(&normalize_phrase(phrase)).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
