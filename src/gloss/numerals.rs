/*!
 * Spelled-out English numerals.
 *
 * Cardinals are emitted as plain space-separated words ("42" → "forty two",
 * "1200" → "one thousand two hundred"), without "and" or hyphens, so each
 * word can be matched against the vocabulary on its own.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(\d+)(st|nd|rd|th)$").unwrap());

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 7] = [
    "", "thousand", "million", "billion", "trillion", "quadrillion", "quintillion",
];

/// Replace numeric tokens by their spelled-out words
pub fn expand_numerals(words: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(words.len());

    for word in words {
        if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
            out.extend(spell_digits(&word, false));
        } else if let Some(caps) = ORDINAL.captures(&word) {
            out.extend(spell_digits(&caps[1], true));
        } else {
            out.push(word);
        }
    }

    out
}

fn spell_digits(digits: &str, ordinal: bool) -> Vec<String> {
    match digits.parse::<u64>() {
        Ok(n) if ordinal => ordinal_words(n),
        Ok(n) => cardinal_words(n),
        // too large for u64: read it digit by digit
        Err(_) => digits
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| ONES[d as usize].to_string())
            .collect(),
    }
}

/// Cardinal words for a number
pub fn cardinal_words(n: u64) -> Vec<String> {
    if n == 0 {
        return vec![ONES[0].to_string()];
    }

    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push((rest % 1000) as usize);
        rest /= 1000;
    }

    let mut words = Vec::new();
    for (scale, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        words.extend(below_thousand(group));
        if scale > 0 {
            words.push(SCALES[scale].to_string());
        }
    }
    words
}

fn below_thousand(n: usize) -> Vec<String> {
    let mut words = Vec::new();
    let hundreds = n / 100;
    let rest = n % 100;

    if hundreds > 0 {
        words.push(ONES[hundreds].to_string());
        words.push("hundred".to_string());
    }
    if rest >= 20 {
        words.push(TENS[rest / 10].to_string());
        if rest % 10 > 0 {
            words.push(ONES[rest % 10].to_string());
        }
    } else if rest > 0 {
        words.push(ONES[rest].to_string());
    }
    words
}

/// Ordinal words for a number; only the last word changes form
pub fn ordinal_words(n: u64) -> Vec<String> {
    let mut words = cardinal_words(n);
    if let Some(last) = words.pop() {
        words.push(ordinal_form(&last));
    }
    words
}

fn ordinal_form(word: &str) -> String {
    match word {
        "one" => "first".to_string(),
        "two" => "second".to_string(),
        "three" => "third".to_string(),
        "five" => "fifth".to_string(),
        "eight" => "eighth".to_string(),
        "nine" => "ninth".to_string(),
        "twelve" => "twelfth".to_string(),
        w if w.ends_with('y') => format!("{}ieth", &w[..w.len() - 1]),
        w => format!("{}th", w),
    }
}
