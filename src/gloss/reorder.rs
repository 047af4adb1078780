/*!
 * Gloss reordering.
 *
 * A narrow set of heuristics approximating sign-language word order:
 * manual overrides first, then normalization, destination fronting
 * ("i go to paris" → "paris i go"), stopword removal, interrogatives last,
 * and a subject-verb-object → object-subject-verb swap for bare three-word
 * sentences.
 */

use log::debug;

use super::lexicon::{self, DESTINATION_MARKER};
use super::normalizer::Normalizer;
use super::overrides::ManualOverrideTable;

/// Reorder matched tokens into the final gloss sequence
pub fn reorder(tokens: &[String], normalizer: &Normalizer, overrides: &ManualOverrideTable) -> Vec<String> {
    let phrase = tokens.join(" ");
    if let Some(literal) = overrides.get(phrase.trim()) {
        debug!("Manual override for {:?}", phrase);
        return literal.to_vec();
    }

    let normalized: Vec<String> = tokens.iter().map(|t| normalizer.normalize_token(t)).collect();

    // keep "to" for the fronting rule
    let kept: Vec<String> = normalized
        .into_iter()
        .filter(|t| !lexicon::is_stopword(t))
        .collect();

    // a fronted sequence is already in sign order, so the OSV swap must not apply
    let (fronted, was_fronted) = match front_destination(&kept) {
        Some(fronted) => (fronted, true),
        None => (kept, false),
    };

    let content: Vec<String> = fronted
        .into_iter()
        .filter(|t| !lexicon::is_stopword(t) && t != DESTINATION_MARKER)
        .collect();

    wh_last(content, !was_fronted)
}

/// `[lead..] [subject] verb [x] to dest..` → `[lead..] dest.. [subject] verb`.
///
/// Only the first "to" is considered and only when a locative verb sits
/// directly before it, or one token further back; a token between the verb
/// and "to" is dropped. Returns `None` when the pattern does not apply.
pub fn front_destination(tokens: &[String]) -> Option<Vec<String>> {
    if tokens.len() < 3 {
        return None;
    }
    let to_idx = tokens.iter().position(|t| t == DESTINATION_MARKER)?;
    if to_idx == 0 {
        return None;
    }

    let verb_idx = if lexicon::is_locative_verb(&tokens[to_idx - 1]) {
        to_idx - 1
    } else if to_idx >= 2 && lexicon::is_locative_verb(&tokens[to_idx - 2]) {
        to_idx - 2
    } else {
        return None;
    };

    let destination = &tokens[to_idx + 1..];
    if destination.is_empty() {
        return None;
    }

    let subject_idx = verb_idx.checked_sub(1);
    let lead_end = subject_idx.unwrap_or(0);

    let mut out = Vec::with_capacity(tokens.len());
    out.extend_from_slice(&tokens[..lead_end]);
    out.extend_from_slice(destination);
    if let Some(idx) = subject_idx {
        out.push(tokens[idx].clone());
    }
    out.push(tokens[verb_idx].clone());
    Some(out)
}

/// Move interrogatives to the end, keeping relative order within each group.
///
/// With `allow_osv`, a bare three-word sentence without interrogatives or
/// multi-word glosses is read as subject-verb-object and emitted as
/// object-subject-verb.
pub fn wh_last(tokens: Vec<String>, allow_osv: bool) -> Vec<String> {
    let (wh, mut rest): (Vec<String>, Vec<String>) =
        tokens.into_iter().partition(|t| lexicon::is_wh_word(t));

    if allow_osv && wh.is_empty() && rest.len() == 3 && rest.iter().all(|t| !t.contains(' ')) {
        rest.rotate_right(1);
        return rest;
    }

    rest.extend(wh);
    rest
}
