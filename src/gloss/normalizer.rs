/*!
 * Vocabulary-aware lexical normalization.
 *
 * Provides:
 * - Contraction expansion that leaves vocabulary idioms like "don't want" intact
 * - Per-token morphological normalization (aliases, irregular plurals,
 *   -ing / -ed / -s stripping) with a fuzzy-match fallback
 *
 * A transformation only applies if its result is a vocabulary key.
 */

use log::trace;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use super::fuzzy::FuzzyMatcher;
use super::lexicon::{self, CONTRACTIONS, DESTINATION_MARKER, IRREGULAR_PLURALS};
use super::vocabulary::Vocabulary;

static CONTRACTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let mut forms: Vec<&str> = CONTRACTIONS.keys().copied().collect();
    forms.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let alternation = forms
        .iter()
        .map(|f| regex::escape(f))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)).unwrap()
});

/// Build a case-insensitive pattern matching `phrase` as whole words
pub fn whole_phrase_pattern(phrase: &str) -> Regex {
    let starts_word = phrase.chars().next().is_some_and(is_word_char);
    let ends_word = phrase.chars().last().is_some_and(is_word_char);
    let pattern = format!(
        "(?i){}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(phrase),
        if ends_word { r"\b" } else { "" }
    );
    Regex::new(&pattern).expect("escaped phrase is a valid pattern")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Replace protected phrases by placeholders, run `expand` on the rest, then
/// restore the phrases verbatim.
///
/// Candidates are tried longest first; only those accepted by `protect` are
/// shielded. Placeholders are plain word characters so word-boundary based
/// expansions leave them alone.
pub fn protect_expand_restore<'a, I, P, E>(text: &str, candidates: I, protect: P, expand: E) -> String
where
    I: IntoIterator<Item = &'a str>,
    P: Fn(&str) -> bool,
    E: FnOnce(&str) -> String,
{
    let mut shielded: Vec<&str> = candidates.into_iter().filter(|c| protect(c)).collect();
    shielded.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let mut protected: Vec<(String, &str)> = Vec::new();
    let mut working = text.to_string();
    for phrase in shielded {
        let pattern = whole_phrase_pattern(phrase);
        if !pattern.is_match(&working) {
            continue;
        }
        let tag = format!("__prot{}__", protected.len());
        working = pattern.replace_all(&working, NoExpand(&tag)).into_owned();
        protected.push((tag, phrase));
    }

    let mut expanded = expand(&working);
    for (tag, phrase) in &protected {
        expanded = expanded.replace(tag.as_str(), phrase);
    }
    expanded
}

/// Expand every contraction in the fixed table
pub fn expand_all_contractions(text: &str) -> String {
    CONTRACTION_PATTERN
        .replace_all(text, |caps: &regex::Captures| {
            let form = caps[0].to_lowercase();
            CONTRACTIONS
                .get(form.as_str())
                .map(|s| s.to_string())
                .unwrap_or(form)
        })
        .into_owned()
}

/// Token normalizer bound to a vocabulary and fuzzy matcher
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    vocabulary: &'a Vocabulary,
    fuzzy: &'a FuzzyMatcher,
}

impl<'a> Normalizer<'a> {
    pub fn new(vocabulary: &'a Vocabulary, fuzzy: &'a FuzzyMatcher) -> Self {
        Self { vocabulary, fuzzy }
    }

    pub fn vocabulary(&self) -> &'a Vocabulary {
        self.vocabulary
    }

    /// Expand contractions, keeping multi-word vocabulary idioms that contain one
    pub fn expand_contractions(&self, text: &str) -> String {
        protect_expand_restore(
            text,
            self.vocabulary.apostrophe_phrases(),
            |_| true,
            expand_all_contractions,
        )
    }

    /// Map a token to a vocabulary-compatible form, or return it unchanged.
    ///
    /// Order: alias, irregular plural, -ing, -ed, -s/-es, fuzzy match.
    pub fn normalize_token(&self, token: &str) -> String {
        let lw = token.to_lowercase();

        if self.vocabulary.contains(&lw)
            || lexicon::is_stopword(&lw)
            || lw == DESTINATION_MARKER
        {
            return lw;
        }

        if let Some(found) = self.morphological(&lw) {
            trace!("Normalized {:?} -> {:?}", lw, found);
            return found;
        }

        if let Some(close) = self.fuzzy.find_best_match(&lw, self.vocabulary.keys()) {
            trace!("Fuzzy matched {:?} -> {:?}", lw, close);
            return close.to_string();
        }

        lw
    }

    fn morphological(&self, lw: &str) -> Option<String> {
        let known = |candidate: &str| !candidate.is_empty() && self.vocabulary.contains(candidate);

        if let Some(target) = lexicon::alias_for(lw) {
            if known(target) {
                return Some(target.to_string());
            }
        }

        if let Some(singular) = IRREGULAR_PLURALS.get(lw) {
            if known(singular) {
                return Some(singular.to_string());
            }
        }

        // gerund
        if let Some(base) = lw.strip_suffix("ing") {
            let with_e = format!("{}e", base);
            if known(base) {
                return Some(base.to_string());
            }
            if known(&with_e) {
                return Some(with_e);
            }
        }

        // past tense
        if let Some(stem) = lw.strip_suffix("ied") {
            let with_y = format!("{}y", stem);
            if known(&with_y) {
                return Some(with_y);
            }
        }
        if let Some(base) = lw.strip_suffix("ed") {
            let with_e = format!("{}e", base);
            if known(base) {
                return Some(base.to_string());
            }
            if known(&with_e) {
                return Some(with_e);
            }
            if let Some(undoubled) = undouble_final_consonant(base) {
                if known(undoubled) {
                    return Some(undoubled.to_string());
                }
            }
        }

        // plural and third person
        let es_stem = lw.strip_suffix("es");
        let s_stem = lw.strip_suffix('s');
        if let Some(stem) = es_stem {
            if known(stem) {
                return Some(stem.to_string());
            }
        }
        if let Some(stem) = s_stem {
            if known(stem) {
                return Some(stem.to_string());
            }
        }
        for stem in [es_stem, s_stem].into_iter().flatten() {
            let with_e = format!("{}e", stem);
            if known(&with_e) {
                return Some(with_e);
            }
        }

        None
    }
}

/// "plann" -> "plan"; None unless the word ends in a doubled consonant
fn undouble_final_consonant(base: &str) -> Option<&str> {
    let mut chars = base.chars().rev();
    let (last, before) = (chars.next()?, chars.next()?);
    if last == before && last.is_ascii_alphabetic() && !"aeiou".contains(last) {
        Some(&base[..base.len() - last.len_utf8()])
    } else {
        None
    }
}
