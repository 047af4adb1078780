/*!
 * Gloss translation engine.
 *
 * Orchestrates one translation: tokenize and match, reorder, resolve assets,
 * then hand the asset list to a `ClipExporter`. Everything up to the export
 * is synchronous and works on an immutable vocabulary snapshot.
 */

use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::TranslationError;
use crate::export::ClipExporter;

use super::fuzzy::FuzzyMatcher;
use super::matcher::tokenize_and_match;
use super::normalizer::Normalizer;
use super::overrides::ManualOverrideTable;
use super::reorder::reorder;
use super::resolver::{
    dedup_adjacent, AssetResolver, CoverageReport, ResolvedSequence, DEFAULT_COVERAGE_THRESHOLD,
};
use super::spelling::spell_out;
use super::vocabulary::Vocabulary;

/// Glosses and their resolution, before export
#[derive(Debug, Clone, Serialize)]
pub struct GlossPlan {
    pub phrase: String,
    pub glosses: Vec<String>,
    pub resolved: ResolvedSequence,
}

impl GlossPlan {
    pub fn coverage(&self) -> &CoverageReport {
        &self.resolved.coverage
    }
}

/// Result of a full translation
#[derive(Debug, Clone, Serialize)]
pub struct TranslationOutcome {
    /// Path of the exported artifact
    pub artifact: PathBuf,
    pub glosses: Vec<String>,
    pub coverage: CoverageReport,
    pub plan: GlossPlan,
}

/// English phrase → gloss sequence → rendered artifact
#[derive(Debug, Clone)]
pub struct GlossEngine {
    vocabulary: Arc<Vocabulary>,
    overrides: Arc<ManualOverrideTable>,
    fuzzy: FuzzyMatcher,
    coverage_threshold: f32,
}

impl GlossEngine {
    /// Create an engine over a non-empty vocabulary
    pub fn new(vocabulary: Arc<Vocabulary>) -> Result<Self, TranslationError> {
        if vocabulary.is_empty() {
            return Err(TranslationError::EmptyVocabulary);
        }

        Ok(Self {
            vocabulary,
            overrides: Arc::new(ManualOverrideTable::new()),
            fuzzy: FuzzyMatcher::default(),
            coverage_threshold: DEFAULT_COVERAGE_THRESHOLD,
        })
    }

    pub fn with_overrides(mut self, overrides: Arc<ManualOverrideTable>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_fuzzy(mut self, fuzzy: FuzzyMatcher) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.coverage_threshold = threshold;
        self
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    pub fn coverage_threshold(&self) -> f32 {
        self.coverage_threshold
    }

    fn normalizer(&self) -> Normalizer<'_> {
        Normalizer::new(&self.vocabulary, &self.fuzzy)
    }

    fn resolver(&self) -> AssetResolver<'_> {
        AssetResolver::new(self.normalizer(), self.coverage_threshold)
    }

    /// Matched tokens, before reordering
    pub fn tokenize(&self, phrase: &str) -> Vec<String> {
        tokenize_and_match(phrase, &self.normalizer())
    }

    /// Final gloss sequence for a phrase, without adjacent repeats
    pub fn glosses(&self, phrase: &str) -> Result<Vec<String>, TranslationError> {
        let tokens = self.tokenize(phrase);
        if tokens.is_empty() {
            return Err(TranslationError::EmptyInput {
                phrase: phrase.to_string(),
            });
        }

        let glosses = dedup_adjacent(&reorder(&tokens, &self.normalizer(), &self.overrides));
        debug!("{:?} -> {:?} -> {:?}", phrase, tokens, glosses);
        if glosses.is_empty() {
            return Err(TranslationError::EmptyInput {
                phrase: phrase.to_string(),
            });
        }
        Ok(glosses)
    }

    /// Glosses plus resolved assets and coverage
    pub fn plan(&self, phrase: &str) -> Result<GlossPlan, TranslationError> {
        let glosses = self.glosses(phrase)?;
        let resolved = self.resolver().resolve(&glosses)?;
        Ok(GlossPlan {
            phrase: phrase.to_string(),
            glosses,
            resolved,
        })
    }

    /// Letter-by-letter plan; double letters are kept and pauses separate words
    pub fn spell_plan(&self, text: &str) -> Result<GlossPlan, TranslationError> {
        let glosses = spell_out(text);
        if glosses.is_empty() {
            return Err(TranslationError::EmptyInput {
                phrase: text.to_string(),
            });
        }
        let resolved = self.resolver().resolve_exact_sequence(&glosses)?;
        Ok(GlossPlan {
            phrase: text.to_string(),
            glosses,
            resolved,
        })
    }

    /// Translate a phrase and export the result to `destination`
    pub async fn translate(
        &self,
        phrase: &str,
        exporter: &dyn ClipExporter,
        destination: &Path,
    ) -> Result<TranslationOutcome, TranslationError> {
        let plan = self.plan(phrase)?;
        Self::export(plan, exporter, destination).await
    }

    /// Fingerspell text and export the result to `destination`
    pub async fn spell(
        &self,
        text: &str,
        exporter: &dyn ClipExporter,
        destination: &Path,
    ) -> Result<TranslationOutcome, TranslationError> {
        let plan = self.spell_plan(text)?;
        Self::export(plan, exporter, destination).await
    }

    async fn export(
        plan: GlossPlan,
        exporter: &dyn ClipExporter,
        destination: &Path,
    ) -> Result<TranslationOutcome, TranslationError> {
        info!(
            "Exporting {} assets for {:?} with {}",
            plan.resolved.assets.len(),
            plan.phrase,
            exporter.name()
        );
        let artifact = exporter.export(&plan.resolved.assets, destination).await?;

        Ok(TranslationOutcome {
            artifact,
            glosses: plan.glosses.clone(),
            coverage: plan.resolved.coverage.clone(),
            plan,
        })
    }
}

/// One-shot translation over a shared vocabulary.
///
/// Builds a throwaway engine; callers translating many phrases should keep a
/// `GlossEngine` instead.
pub async fn translate(
    phrase: &str,
    vocabulary: &Arc<Vocabulary>,
    overrides: Option<Arc<ManualOverrideTable>>,
    threshold: Option<f32>,
    exporter: &dyn ClipExporter,
    destination: &Path,
) -> Result<TranslationOutcome, TranslationError> {
    let mut engine = GlossEngine::new(Arc::clone(vocabulary))?;
    if let Some(overrides) = overrides {
        engine = engine.with_overrides(overrides);
    }
    if let Some(threshold) = threshold {
        engine = engine.with_threshold(threshold);
    }
    engine.translate(phrase, exporter, destination).await
}
