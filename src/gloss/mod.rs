/*!
 * English to sign-language gloss translation.
 *
 * This module contains the translation pipeline, leaves first:
 * - vocabulary / store: the phrase → asset index and its reloadable handle
 * - lexicon / numerals / fuzzy / normalizer: vocabulary-aware normalization
 * - matcher: alias substitution and greedy n-gram matching
 * - overrides / reorder: gloss ordering heuristics
 * - resolver / spelling: asset resolution, fingerspelling and coverage
 * - engine / batch: orchestration
 */

pub mod batch;
pub mod engine;
pub mod fuzzy;
pub mod lexicon;
pub mod matcher;
pub mod normalizer;
pub mod numerals;
pub mod overrides;
pub mod reorder;
pub mod resolver;
pub mod spelling;
pub mod store;
pub mod vocabulary;

pub use batch::{BatchItem, BatchJob, BatchReport, BatchTranslator};
pub use engine::{translate, GlossEngine, GlossPlan, TranslationOutcome};
pub use fuzzy::{FuzzyMatcher, ScorerKind, SimilarityScorer, DEFAULT_FUZZY_CUTOFF};
pub use matcher::tokenize_and_match;
pub use normalizer::{protect_expand_restore, Normalizer};
pub use overrides::ManualOverrideTable;
pub use reorder::reorder;
pub use resolver::{
    AssetResolver, CoverageReport, GlossResolution, ResolvedGloss, ResolvedSequence,
    DEFAULT_COVERAGE_THRESHOLD, PAUSE_TOKEN,
};
pub use spelling::spell_out;
pub use store::VocabularyStore;
pub use vocabulary::{Asset, AssetKind, LetterSelection, Vocabulary, VocabularySources, VocabularyStats};
