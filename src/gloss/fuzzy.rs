/*!
 * Fuzzy matching of tokens against vocabulary keys.
 *
 * The similarity measure is pluggable through `SimilarityScorer`; the cutoff is
 * a property of the matcher so it can be tuned from configuration.
 */

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

/// Default cutoff; conservative so only near-identical spellings match
pub const DEFAULT_FUZZY_CUTOFF: f32 = 0.87;

/// Similarity measure between two strings, in 0.0-1.0
pub trait SimilarityScorer: Send + Sync + Debug {
    /// Score two strings; 1.0 means identical
    fn score(&self, a: &str, b: &str) -> f32;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Available scorers, as named in configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScorerKind {
    /// Ratcliff/Obershelp matching-blocks ratio
    #[default]
    Sequence,
    /// Normalized Levenshtein distance
    Levenshtein,
    /// Jaro-Winkler similarity
    JaroWinkler,
}

impl ScorerKind {
    pub fn scorer(self) -> Arc<dyn SimilarityScorer> {
        match self {
            Self::Sequence => Arc::new(SequenceRatioScorer),
            Self::Levenshtein => Arc::new(LevenshteinScorer),
            Self::JaroWinkler => Arc::new(JaroWinklerScorer),
        }
    }
}

/// `2 * matches / total length`, where matches are found by recursively
/// taking the longest common block and recursing on both sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceRatioScorer;

impl SimilarityScorer for SequenceRatioScorer {
    fn score(&self, a: &str, b: &str) -> f32 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let total = a.len() + b.len();
        if total == 0 {
            return 1.0;
        }
        let matched = matching_chars(&a, &b);
        2.0 * matched as f32 / total as f32
    }

    fn name(&self) -> &'static str {
        "sequence"
    }
}

/// Normalized edit distance
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinScorer;

impl SimilarityScorer for LevenshteinScorer {
    fn score(&self, a: &str, b: &str) -> f32 {
        strsim::normalized_levenshtein(a, b) as f32
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinklerScorer;

impl SimilarityScorer for JaroWinklerScorer {
    fn score(&self, a: &str, b: &str) -> f32 {
        strsim::jaro_winkler(a, b) as f32
    }

    fn name(&self) -> &'static str {
        "jarowinkler"
    }
}

/// Fuzzy matcher with a scorer and a cutoff
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    scorer: Arc<dyn SimilarityScorer>,
    /// Minimum similarity to accept (0.0-1.0, higher = stricter)
    cutoff: f32,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(ScorerKind::default().scorer(), DEFAULT_FUZZY_CUTOFF)
    }
}

impl FuzzyMatcher {
    pub fn new(scorer: Arc<dyn SimilarityScorer>, cutoff: f32) -> Self {
        Self {
            scorer,
            cutoff: cutoff.clamp(0.0, 1.0),
        }
    }

    pub fn from_kind(kind: ScorerKind, cutoff: f32) -> Self {
        Self::new(kind.scorer(), cutoff)
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    /// Similarity between two strings, case-insensitive
    pub fn similarity(&self, a: &str, b: &str) -> f32 {
        self.scorer.score(&a.to_lowercase(), &b.to_lowercase())
    }

    /// Find the best matching term above the cutoff.
    ///
    /// Ties keep the earliest candidate.
    pub fn find_best_match<'a, I>(&self, text: &str, terms: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best_match: Option<(&str, f32)> = None;

        for term in terms {
            let sim = self.similarity(text, term);
            if sim < self.cutoff {
                continue;
            }
            match best_match {
                Some((_, best_sim)) if sim <= best_sim => {}
                _ => best_match = Some((term, sim)),
            }
        }

        best_match.map(|(term, _)| term)
    }
}

/// Total size of the matching blocks between two sequences
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, size) = longest_common_block(a, b);
    if size == 0 {
        return 0;
    }
    size + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + size..], &b[j + size..])
}

/// Longest common contiguous block; earliest in `a`, then in `b`, on ties
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for i in 0..a.len() {
        for j in 0..b.len() {
            curr[j + 1] = if a[i] == b[j] { prev[j] + 1 } else { 0 };
            let size = curr[j + 1];
            if size > best.2 {
                best = (i + 1 - size, j + 1 - size, size);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}
