/*!
 * Phrase tokenization and greedy vocabulary matching.
 *
 * Steps, in order: lowercase, multi-word alias substitution, punctuation
 * stripping, protected contraction expansion, numeral expansion, then a
 * greedy longest-first n-gram scan over the vocabulary keys.
 */

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use super::lexicon::ALIASES;
use super::normalizer::{whole_phrase_pattern, Normalizer};
use super::numerals::expand_numerals;
use super::vocabulary::Vocabulary;

/// Everything except word characters, whitespace, apostrophes and hyphens
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s\-']").unwrap());

/// Alias patterns, longest source phrase first
static ALIAS_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let mut aliases: Vec<&(&str, &str)> = ALIASES.iter().collect();
    // stable sort keeps table order between equally long sources
    aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    aliases
        .into_iter()
        .filter(|(source, target)| source != target)
        .map(|(source, target)| (whole_phrase_pattern(source), *target))
        .collect()
});

/// Substitute alias phrases whose destination is a vocabulary key
pub fn apply_aliases(text: &str, vocabulary: &Vocabulary) -> String {
    let mut text = text.to_string();
    for (pattern, target) in ALIAS_PATTERNS.iter() {
        if vocabulary.contains(target) && pattern.is_match(&text) {
            text = pattern.replace_all(&text, NoExpand(target)).into_owned();
        }
    }
    text
}

/// Replace punctuation (apostrophes and hyphens excepted) by spaces
pub fn strip_punctuation(text: &str) -> String {
    PUNCTUATION.replace_all(text, " ").into_owned()
}

/// Lowercased, alias-substituted, punctuation-free, contraction-expanded and
/// numeral-expanded words of a phrase
pub fn prepare_words(phrase: &str, normalizer: &Normalizer) -> Vec<String> {
    let text = phrase.to_lowercase();
    let text = apply_aliases(&text, normalizer.vocabulary());
    let text = strip_punctuation(&text);
    let text = normalizer.expand_contractions(&text);

    let words = text.split_whitespace().map(str::to_string).collect();
    expand_numerals(words)
}

/// Greedy longest-first match of words against vocabulary keys.
///
/// At each position the widest window that is a key is consumed as one
/// token; otherwise the single word is emitted and the scan moves on.
pub fn greedy_match(words: &[String], vocabulary: &Vocabulary) -> Vec<String> {
    let max_window = vocabulary.max_phrase_len();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < words.len() {
        let widest = max_window.min(words.len() - i);
        let matched = (1..=widest).rev().find_map(|len| {
            let candidate = words[i..i + len].join(" ");
            vocabulary.contains(&candidate).then_some((candidate, len))
        });

        match matched {
            Some((token, len)) => {
                tokens.push(token);
                i += len;
            }
            None => {
                tokens.push(words[i].clone());
                i += 1;
            }
        }
    }

    tokens
}

/// Tokenize a phrase into vocabulary keys and leftover words
pub fn tokenize_and_match(phrase: &str, normalizer: &Normalizer) -> Vec<String> {
    let words = prepare_words(phrase, normalizer);
    greedy_match(&words, normalizer.vocabulary())
}
