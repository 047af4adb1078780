/*!
 * Fixed English lexicon tables used by the gloss pipeline.
 *
 * Every table here is conservative: entries only take effect when their
 * target form is actually present in the loaded vocabulary.
 */

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Irregular plural to singular forms
pub static IRREGULAR_PLURALS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("children", "child"),
        ("teeth", "tooth"),
        ("feet", "foot"),
        ("mice", "mouse"),
        ("men", "man"),
        ("women", "woman"),
        ("people", "person"),
        ("geese", "goose"),
    ])
});

/// Contractions that may be expanded when no vocabulary phrase protects them
pub static CONTRACTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("i'm", "i am"),
        ("you're", "you are"),
        ("he's", "he is"),
        ("she's", "she is"),
        ("it's", "it is"),
        ("we're", "we are"),
        ("they're", "they are"),
        ("i've", "i have"),
        ("you've", "you have"),
        ("we've", "we have"),
        ("they've", "they have"),
        ("i'd", "i would"),
        ("you'd", "you would"),
        ("he'd", "he would"),
        ("she'd", "she would"),
        ("we'd", "we would"),
        ("they'd", "they would"),
        ("i'll", "i will"),
        ("you'll", "you will"),
        ("he'll", "he will"),
        ("she'll", "she will"),
        ("we'll", "we will"),
        ("they'll", "they will"),
        ("can't", "cannot"),
        ("won't", "will not"),
        ("isn't", "is not"),
        ("aren't", "are not"),
        ("wasn't", "was not"),
        ("weren't", "were not"),
        ("don't", "do not"),
        ("doesn't", "does not"),
        ("didn't", "did not"),
        ("shouldn't", "should not"),
        ("wouldn't", "would not"),
        ("couldn't", "could not"),
        ("there's", "there is"),
        ("that's", "that is"),
        ("what's", "what is"),
        ("who's", "who is"),
    ])
});

/// Source phrase to vocabulary phrase aliases.
///
/// Kept as an ordered list so that ties between equally long sources are
/// applied in a stable order.
pub const ALIASES: &[(&str, &str)] = &[
    // quantifiers
    ("lots", "a lot"),
    ("a lot of", "a lot"),
    ("plenty of", "plenty"),
    ("many", "many"),
    ("much", "much"),
    ("some", "some"),
    // politeness
    ("thanks", "thank you"),
    ("thankyou", "thank you"),
    ("thx", "thank you"),
    // time
    ("today", "today"),
    ("yesterday", "yesterday"),
    ("tomorrow", "tomorrow"),
    ("last year", "last year"),
    ("tonight", "tonight"),
    ("morning", "morning"),
    ("afternoon", "afternoon"),
    ("evening", "evening"),
    // motion intents
    ("go to", "go"),
    ("went to", "go"),
    ("going to", "go"),
    ("travel to", "travel"),
    ("come to", "come"),
    ("arrive to", "arrive"),
    ("walk to", "walk"),
    ("run to", "run"),
    // negation
    ("do not want", "don't want"),
    ("dont want", "don't want"),
];

/// Looks up a single-token alias target
pub fn alias_for(token: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(source, _)| *source == token)
        .map(|(_, target)| *target)
}

/// Articles, copulas and light prepositions dropped from the gloss sequence
pub static STOPWORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["a", "an", "the", "is", "are", "am", "of", "for"]));

/// Sentinel kept through stopword removal to detect destinations
pub const DESTINATION_MARKER: &str = "to";

/// Interrogatives moved to the end of the sequence
pub static WH_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["what", "where", "who", "when", "why", "how"]));

/// Motion verbs that trigger destination fronting
pub static LOCATIVE_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "go", "travel", "walk", "run", "come", "arrive", "drive", "fly", "move", "visit", "return",
    ])
});

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

pub fn is_wh_word(token: &str) -> bool {
    WH_WORDS.contains(token)
}

pub fn is_locative_verb(token: &str) -> bool {
    LOCATIVE_VERBS.contains(token)
}
