//! Locale-aware name comparison
//!
//! Levels, each consulted only when the previous one ties:
//!
//! 1. base letters: case-folded, diacritics removed, `đ` read as `d`
//! 2. diacritics: unaccented before accented
//! 3. case: lowercase before uppercase
//! 4. code points

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compares two names the way a user's locale would order them.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| compare_case(a, b))
        .then_with(|| a.cmp(b))
}

fn fold_letter(c: char) -> char {
    match c {
        'đ' => 'd',
        other => other,
    }
}

/// Base letters only.
fn primary_key(s: &str) -> Vec<char> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(fold_letter)
        .collect()
}

/// Letters with their marks, case-folded.
fn secondary_key(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn compare_case(a: &str, b: &str) -> Ordering {
    let a_chars = a.nfd().filter(|c| !is_combining_mark(*c));
    let b_chars = b.nfd().filter(|c| !is_combining_mark(*c));

    for (x, y) in a_chars.zip(b_chars) {
        match (x.is_lowercase() && y.is_uppercase(), x.is_uppercase() && y.is_lowercase()) {
            (true, _) => return Ordering::Less,
            (_, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
