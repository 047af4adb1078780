/*!
 * Tests for gloss reordering
 */

use signgloss::gloss::{reorder, FuzzyMatcher, ManualOverrideTable, Normalizer};

use crate::common;

fn toks(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_reorder_destinationFronting_shouldDropMarker() {
    let vocabulary = common::vocabulary(&["i", "go", "paris"]);
    let fuzzy = FuzzyMatcher::default();
    let normalizer = Normalizer::new(&vocabulary, &fuzzy);

    let glosses = reorder(&toks(&["i", "go", "to", "paris"]), &normalizer, &ManualOverrideTable::new());

    assert_eq!(glosses, toks(&["paris", "i", "go"]));
}

/// A fronted three-word result is not rotated again by the OSV fallback
#[test]
fn test_reorder_frontedThreeWords_shouldNotBeRotated() {
    let vocabulary = common::vocabulary(&["i", "drive", "paris"]);
    let fuzzy = FuzzyMatcher::default();
    let normalizer = Normalizer::new(&vocabulary, &fuzzy);

    let glosses = reorder(&toks(&["i", "drive", "to", "paris"]), &normalizer, &ManualOverrideTable::new());

    assert_eq!(glosses, toks(&["paris", "i", "drive"]));
}

#[test]
fn test_reorder_verbTwoBack_shouldDropTokenBeforeMarker() {
    let vocabulary = common::vocabulary(&["i", "go", "back", "school"]);
    let fuzzy = FuzzyMatcher::default();
    let normalizer = Normalizer::new(&vocabulary, &fuzzy);

    let glosses = reorder(&toks(&["i", "go", "back", "to", "school"]), &normalizer, &ManualOverrideTable::new());

    assert_eq!(glosses, toks(&["school", "i", "go"]));
}

#[test]
fn test_reorder_whQuestion_shouldEndWithInterrogative() {
    let vocabulary = common::vocabulary(&["where", "you", "go"]);
    let fuzzy = FuzzyMatcher::default();
    let normalizer = Normalizer::new(&vocabulary, &fuzzy);

    let glosses = reorder(&toks(&["where", "are", "you", "going"]), &normalizer, &ManualOverrideTable::new());

    assert_eq!(glosses, toks(&["you", "go", "where"]));
}

#[test]
fn test_reorder_manualOverride_shouldBypassHeuristics() {
    let vocabulary = common::vocabulary(&["how", "you"]);
    let fuzzy = FuzzyMatcher::default();
    let normalizer = Normalizer::new(&vocabulary, &fuzzy);
    let overrides = ManualOverrideTable::from_pairs([("how are you", vec!["how", "you"])]);

    let glosses = reorder(&toks(&["how", "are", "you"]), &normalizer, &overrides);
    assert_eq!(glosses, toks(&["how", "you"]));

    let without = reorder(&toks(&["how", "are", "you"]), &normalizer, &ManualOverrideTable::new());
    assert_eq!(without, toks(&["you", "how"]));
}

#[test]
fn test_reorder_threeWordSentence_shouldBecomeObjectSubjectVerb() {
    let vocabulary = common::vocabulary(&["i", "like", "apple"]);
    let fuzzy = FuzzyMatcher::default();
    let normalizer = Normalizer::new(&vocabulary, &fuzzy);

    let glosses = reorder(&toks(&["i", "like", "apples"]), &normalizer, &ManualOverrideTable::new());

    assert_eq!(glosses, toks(&["apple", "i", "like"]));
}

#[test]
fn test_reorder_shouldDropStopwordsAndMarker() {
    let vocabulary = common::vocabulary(&["cat", "want", "eat", "fish", "now"]);
    let fuzzy = FuzzyMatcher::default();
    let normalizer = Normalizer::new(&vocabulary, &fuzzy);

    let glosses = reorder(
        &toks(&["the", "cat", "want", "to", "eat", "a", "fish", "now"]),
        &normalizer,
        &ManualOverrideTable::new(),
    );

    assert_eq!(glosses, toks(&["cat", "want", "eat", "fish", "now"]));
}

/// Reordering an already reordered, stopword-free sequence changes nothing
#[test]
fn test_reorder_shouldBeIdempotentWithoutTriggers() {
    let vocabulary = common::vocabulary(&["my", "mother", "cook", "dinner", "where", "you", "live"]);
    let fuzzy = FuzzyMatcher::default();
    let normalizer = Normalizer::new(&vocabulary, &fuzzy);
    let overrides = ManualOverrideTable::new();

    for sequence in [
        toks(&["my", "mother", "cook", "dinner"]),
        toks(&["you", "live", "where"]),
    ] {
        let once = reorder(&sequence, &normalizer, &overrides);
        assert_eq!(once, sequence);
        assert_eq!(reorder(&once, &normalizer, &overrides), once);
    }
}
