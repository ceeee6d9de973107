//! Classification of citation keys into their syntactic families.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Bibcodes are nominally 19 characters, YYYYJJJJJVVVVMPPPPA. The
    // character-class check is loose on purpose: downstream source ordering
    // depends on this exact heuristic.
    static ref BIBCODE: Regex = Regex::new(r"^\d{4}[A-Za-z&.]+\..*[A-Z]$").unwrap();
    static ref INSPIRE: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9-]+:\d{4}[a-z]{2,3}$").unwrap();
    static ref ARXIV_NEW: Regex = Regex::new(r"^\d{4}\.\d{4,5}$").unwrap();
    static ref ARXIV_OLD: Regex = Regex::new(r"^[a-zA-Z-]+/\d{7}$").unwrap();
}

/// The syntactic family of a citation key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyKind {
    /// Human-authored INSPIRE texkey, e.g. `Abbott:2016blz`.
    Inspire,
    /// ADS bibcode, e.g. `2016PhRvL.116f1102A`.
    Bibcode,
    /// arXiv identifier, modern (`2508.18080`) or legacy (`hep-ph/9905318`).
    Arxiv,
    /// None of the recognized families.
    Unknown,
}

/// Returns true when `key` looks like an ADS bibcode.
#[must_use]
pub fn is_bibcode(key: &str) -> bool {
    key.len() >= 15 && BIBCODE.is_match(key)
}

/// Returns true when `key` looks like an INSPIRE texkey (`Author:YYYYxyz`).
#[must_use]
pub fn is_inspire_key(key: &str) -> bool {
    INSPIRE.is_match(key)
}

/// Returns true when `key` is an arXiv identifier in the modern
/// `NNNN.NNNNN` form or the legacy `category/NNNNNNN` form.
#[must_use]
pub fn is_arxiv_id(key: &str) -> bool {
    ARXIV_NEW.is_match(key) || ARXIV_OLD.is_match(key)
}

/// Classifies `key` as the first matching family, else [`KeyKind::Unknown`].
#[must_use]
pub fn classify(key: &str) -> KeyKind {
    if is_inspire_key(key) {
        KeyKind::Inspire
    } else if is_bibcode(key) {
        KeyKind::Bibcode
    } else if is_arxiv_id(key) {
        KeyKind::Arxiv
    } else {
        KeyKind::Unknown
    }
}
