/*!
 * Asset resolution and coverage reporting.
 *
 * Each gloss is resolved by exact lookup, then by its normalized form, and
 * finally by fingerspelling its letters. Coverage counts glosses that were
 * fully rendered; a shortfall below the threshold is a warning, not an error.
 */

use log::{debug, warn};
use serde::Serialize;

use crate::errors::{PartialCoverageWarning, TranslationError};

use super::normalizer::Normalizer;
use super::vocabulary::Asset;

/// Default completeness threshold for the coverage warning
pub const DEFAULT_COVERAGE_THRESHOLD: f32 = 0.97;

/// Separator emitted between words in fingerspelling-only mode
pub const PAUSE_TOKEN: &str = "<pause>";

/// How a single gloss was rendered
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum GlossResolution {
    /// The gloss is a vocabulary key
    Exact,
    /// The gloss normalized to another key
    Normalized { key: String },
    /// Letter by letter; `missing` lists letters without an asset
    Fingerspelled { missing: Vec<char> },
    /// A pause between spelled words
    Pause,
}

/// Resolution record for one gloss
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedGloss {
    pub gloss: String,
    pub resolution: GlossResolution,
    /// Number of assets this gloss contributed
    pub asset_count: usize,
}

impl ResolvedGloss {
    /// Fully rendered (fingerspelling counts only without gaps)
    pub fn is_covered(&self) -> bool {
        match &self.resolution {
            GlossResolution::Exact | GlossResolution::Normalized { .. } => true,
            GlossResolution::Fingerspelled { missing } => missing.is_empty() && self.asset_count > 0,
            GlossResolution::Pause => false,
        }
    }
}

/// Completeness of a translation
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    /// Glosses requested (pauses excluded)
    pub total: usize,
    /// Glosses fully resolved
    pub covered: usize,
    /// `covered / total`, 0.0 when nothing was requested
    pub fraction: f32,
    pub threshold: f32,
    /// Glosses that were not fully resolved
    pub missing: Vec<String>,
    #[serde(skip)]
    pub warning: Option<PartialCoverageWarning>,
}

impl CoverageReport {
    pub fn new(total: usize, covered: usize, threshold: f32, missing: Vec<String>) -> Self {
        let fraction = if total > 0 {
            covered as f32 / total as f32
        } else {
            0.0
        };
        let warning = (fraction < threshold).then_some(PartialCoverageWarning {
            coverage: fraction,
            threshold,
        });

        Self {
            total,
            covered,
            fraction,
            threshold,
            missing,
            warning,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.warning.is_none()
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Coverage: {:.1}% ({} of {} glosses)",
            self.fraction * 100.0,
            self.covered,
            self.total
        );
        if !self.missing.is_empty() {
            text.push_str(&format!(" - missing: {}", self.missing.join(", ")));
        }
        text
    }
}

/// Ordered assets plus how they were found
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSequence {
    pub glosses: Vec<ResolvedGloss>,
    pub assets: Vec<Asset>,
    pub coverage: CoverageReport,
}

/// Drop immediately repeated glosses ("go go" → "go")
pub fn dedup_adjacent(glosses: &[String]) -> Vec<String> {
    let mut out: Vec<String> = glosses.to_vec();
    out.dedup();
    out
}

/// Maps glosses to assets
#[derive(Debug, Clone, Copy)]
pub struct AssetResolver<'a> {
    normalizer: Normalizer<'a>,
    threshold: f32,
}

impl<'a> AssetResolver<'a> {
    pub fn new(normalizer: Normalizer<'a>, threshold: f32) -> Self {
        Self {
            normalizer,
            threshold,
        }
    }

    /// Deduplicate adjacent glosses, then resolve them
    pub fn resolve(&self, glosses: &[String]) -> Result<ResolvedSequence, TranslationError> {
        let deduped = dedup_adjacent(glosses);
        self.resolve_exact_sequence(&deduped)
    }

    /// Resolve without deduplication (spelled sequences keep double letters)
    pub fn resolve_exact_sequence(&self, glosses: &[String]) -> Result<ResolvedSequence, TranslationError> {
        let mut assets = Vec::new();
        let mut resolved = Vec::with_capacity(glosses.len());

        for gloss in glosses {
            let record = self.resolve_one(gloss, &mut assets);
            resolved.push(record);
        }

        let counted: Vec<&ResolvedGloss> = resolved
            .iter()
            .filter(|r| r.resolution != GlossResolution::Pause)
            .collect();
        let covered = counted.iter().filter(|r| r.is_covered()).count();
        let missing = counted
            .iter()
            .filter(|r| !r.is_covered())
            .map(|r| r.gloss.clone())
            .collect();

        let coverage = CoverageReport::new(counted.len(), covered, self.threshold, missing);
        if let Some(warning) = &coverage.warning {
            warn!("{}", warning);
        }

        if assets.is_empty() {
            return Err(TranslationError::UnresolvableContent {
                glosses: glosses.to_vec(),
            });
        }

        Ok(ResolvedSequence {
            glosses: resolved,
            assets,
            coverage,
        })
    }

    fn resolve_one(&self, gloss: &str, assets: &mut Vec<Asset>) -> ResolvedGloss {
        let vocabulary = self.normalizer.vocabulary();
        let key = gloss.to_lowercase();

        if key == PAUSE_TOKEN {
            return ResolvedGloss {
                gloss: gloss.to_string(),
                resolution: GlossResolution::Pause,
                asset_count: 0,
            };
        }

        if let Some(asset) = vocabulary.get(&key) {
            assets.push(asset.clone());
            return ResolvedGloss {
                gloss: gloss.to_string(),
                resolution: GlossResolution::Exact,
                asset_count: 1,
            };
        }

        let normalized = self.normalizer.normalize_token(&key);
        if let Some(asset) = vocabulary.get(&normalized) {
            debug!("Resolved {:?} via {:?}", gloss, normalized);
            assets.push(asset.clone());
            return ResolvedGloss {
                gloss: gloss.to_string(),
                resolution: GlossResolution::Normalized { key: normalized },
                asset_count: 1,
            };
        }

        debug!("Finger-spelling {:?}", gloss);
        let mut missing = Vec::new();
        let mut asset_count = 0;
        let letters: Vec<char> = key.chars().filter(|c| c.is_alphabetic()).collect();
        if letters.is_empty() {
            warn!("No letters to finger-spell in {:?}; it stays uncovered", gloss);
        }
        for letter in letters {
            match vocabulary.get(letter.encode_utf8(&mut [0; 4])) {
                Some(asset) => {
                    assets.push(asset.clone());
                    asset_count += 1;
                }
                None => {
                    warn!("No asset for letter {:?} in {:?}", letter, gloss);
                    missing.push(letter);
                }
            }
        }

        ResolvedGloss {
            gloss: gloss.to_string(),
            resolution: GlossResolution::Fingerspelled { missing },
            asset_count,
        }
    }
}
