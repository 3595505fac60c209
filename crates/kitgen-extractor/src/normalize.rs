//! Text normalization and fuzzy comparison
//!
//! File names are compared after normalization so that "Contrato Físico.PDF"
//! and "contrato  fisico.pdf" are the same name.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a string for comparison
///
/// Decomposes accented characters, drops the combining marks, lower-cases,
/// collapses whitespace runs into one space and trims. Total and idempotent.
///
/// # Examples
///
/// ```
/// use kitgen_extractor::normalize;
///
/// assert_eq!(normalize("  Contrato   FÍSICO.pdf "), "contrato fisico.pdf");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(s: &str) -> String {
    // Lower-casing can expose new decomposable characters, so decompose twice
    let folded: String = s
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();
    let stripped = folded.nfkd().filter(|c| !is_combining_mark(*c));

    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in stripped {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// Remove accents without touching case or spacing
///
/// Used on name patterns so an accented pattern still matches a normalized name
/// while regex escapes such as `\W` keep their meaning.
pub fn strip_accents(s: &str) -> String {
    s.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Minimum number of single-character insertions, deletions and substitutions
/// turning `a` into `b`
///
/// Works on `char`s, so an accented letter counts as one edit.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            let insertion = current[j] + 1;
            let deletion = previous[j + 1] + 1;
            current[j + 1] = substitution.min(insertion).min(deletion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Whether two strings are within `max_distance` edits after normalization
pub fn fuzzy_match(a: &str, b: &str, max_distance: usize) -> bool {
    edit_distance(&normalize(a), &normalize(b)) <= max_distance
}
