/*!
 * Tests for lexical normalization: contractions, numerals, morphology and fuzzy matching
 */

use std::sync::Arc;

use signgloss::gloss::fuzzy::{JaroWinklerScorer, LevenshteinScorer, SequenceRatioScorer};
use signgloss::gloss::normalizer::expand_all_contractions;
use signgloss::gloss::numerals::{cardinal_words, expand_numerals, ordinal_words};
use signgloss::gloss::{protect_expand_restore, FuzzyMatcher, Normalizer, ScorerKind, SimilarityScorer};

use crate::common;

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_protectExpandRestore_longestCandidateFirst() {
    let out = protect_expand_restore(
        "i don't want you, i don't",
        ["don't", "don't want"],
        |c| c.contains(' '),
        expand_all_contractions,
    );
    assert_eq!(out, "i don't want you, i do not");
}

#[test]
fn test_protectExpandRestore_caseInsensitiveMatch_shouldRestoreKeyText() {
    let out = protect_expand_restore("I DON'T WANT it", ["don't want"], |_| true, |t| t.to_string());
    assert_eq!(out, "I don't want it");
}

#[test]
fn test_expandContractions_withoutVocabularyIdiom_shouldExpand() {
    let vocabulary = common::vocabulary(&["want"]);
    let fuzzy = FuzzyMatcher::default();
    let normalizer = Normalizer::new(&vocabulary, &fuzzy);
    assert_eq!(normalizer.expand_contractions("i don't want"), "i do not want");
}

#[test]
fn test_expandNumerals_cardinalsAndOrdinals() {
    assert_eq!(
        expand_numerals(words(&["i", "have", "2", "cats"])),
        words(&["i", "have", "two", "cats"])
    );
    assert_eq!(
        expand_numerals(words(&["the", "21st", "floor"])),
        words(&["the", "twenty", "first", "floor"])
    );
    assert_eq!(expand_numerals(words(&["a1", "x"])), words(&["a1", "x"]));
}

#[test]
fn test_cardinalWords_shouldSpellLargeNumbers() {
    assert_eq!(cardinal_words(0), words(&["zero"]));
    assert_eq!(cardinal_words(115), words(&["one", "hundred", "fifteen"]));
    assert_eq!(
        cardinal_words(2024),
        words(&["two", "thousand", "twenty", "four"])
    );
}

#[test]
fn test_ordinalWords_shouldUseIrregularForms() {
    assert_eq!(ordinal_words(1), words(&["first"]));
    assert_eq!(ordinal_words(12), words(&["twelfth"]));
    assert_eq!(ordinal_words(40), words(&["fortieth"]));
    assert_eq!(ordinal_words(103), words(&["one", "hundred", "third"]));
}

#[test]
fn test_normalizeToken_fuzzyFallback_shouldRespectCutoff() {
    let vocabulary = common::vocabulary(&["beautiful", "cat"]);
    let strict = FuzzyMatcher::default();
    let normalizer = Normalizer::new(&vocabulary, &strict);

    assert_eq!(normalizer.normalize_token("beautifull"), "beautiful");
    assert_eq!(normalizer.normalize_token("dog"), "dog");

    let loose = FuzzyMatcher::new(Arc::new(SequenceRatioScorer), 0.3);
    let normalizer = Normalizer::new(&vocabulary, &loose);
    assert_eq!(normalizer.normalize_token("cut"), "cat");
}

#[test]
fn test_normalizeToken_shouldBeIdempotent() {
    let vocabulary = common::vocabulary(&["walk", "child", "box"]);
    let fuzzy = FuzzyMatcher::default();
    let normalizer = Normalizer::new(&vocabulary, &fuzzy);

    for token in ["walking", "children", "boxes", "unknown"] {
        let once = normalizer.normalize_token(token);
        assert_eq!(normalizer.normalize_token(&once), once);
    }
}

#[test]
fn test_scorers_identicalStrings_shouldScoreOne() {
    let scorers: Vec<Arc<dyn SimilarityScorer>> = vec![
        Arc::new(SequenceRatioScorer),
        Arc::new(LevenshteinScorer),
        Arc::new(JaroWinklerScorer),
    ];
    for scorer in scorers {
        assert!((scorer.score("hello", "hello") - 1.0).abs() < 1e-6, "{}", scorer.name());
        assert!(scorer.score("hello", "xyz") < 0.5, "{}", scorer.name());
    }
}

#[test]
fn test_fuzzyMatcher_fromKind_shouldUseSelectedScorer() {
    let matcher = FuzzyMatcher::from_kind(ScorerKind::JaroWinkler, 0.9);
    assert_eq!(matcher.scorer_name(), "jarowinkler");
    assert!((matcher.cutoff() - 0.9).abs() < 1e-6);
}
