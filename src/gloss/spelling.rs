/*!
 * Fingerspelling-only tokenization.
 */

use super::resolver::PAUSE_TOKEN;

/// Split text into one token per character with a pause between words.
///
/// Only `[a-z0-9 ]` survives after lowercasing; everything else is dropped.
pub fn spell_out(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    let mut tokens = Vec::new();
    for (i, word) in cleaned.split_whitespace().enumerate() {
        if i > 0 {
            tokens.push(PAUSE_TOKEN.to_string());
        }
        tokens.extend(word.chars().map(String::from));
    }
    tokens
}
