//! Text normalization helpers for description and document matching
//!
//! Bank statement descriptions arrive in uppercase, accent-less,
//! abbreviation-heavy form while ledger descriptions are human-entered,
//! so both sides are folded to lowercase ASCII tokens with function words
//! removed before comparison.

use std::collections::HashSet;

/// Function words and boilerplate stripped before token comparison.
/// The source data is Brazilian Portuguese.
const STOPWORDS: &[&str] = &[
    "a", "as", "com", "da", "das", "de", "do", "dos", "e", "em", "na", "nas", "no", "nos", "o",
    "os", "para", "por", "ref", "referente", "um", "uma",
];

/// Fold common Latin accented characters to their ASCII base
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// Normalize a description into a set of comparison tokens:
/// lowercased, accents folded, split on non-alphanumerics, stopwords
/// removed
pub fn normalize_tokens(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .chars()
        .map(fold_accent)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|token| !STOPWORDS.contains(token))
        .map(|token| token.to_string())
        .collect()
}

/// Token-overlap ratio between two descriptions, in [0.0, 1.0]
///
/// Overlap coefficient: shared tokens divided by the size of the smaller
/// token set, so a short ledger description fully contained in a verbose
/// bank description still scores 1.0. Returns 0.0 when either side has no
/// tokens left after normalization.
pub fn token_overlap_ratio(a: &str, b: &str) -> f64 {
    let tokens_a = normalize_tokens(a);
    let tokens_b = normalize_tokens(b);

    let smaller = tokens_a.len().min(tokens_b.len());
    if smaller == 0 {
        return 0.0;
    }

    let shared = tokens_a.intersection(&tokens_b).count();
    shared as f64 / smaller as f64
}

/// Normalize a document reference for exact comparison: alphanumerics
/// only, lowercased
pub fn normalize_document_ref(document_ref: &str) -> String {
    document_ref
        .to_lowercase()
        .chars()
        .map(fold_accent)
        .filter(|c| c.is_alphanumeric())
        .collect()
}
