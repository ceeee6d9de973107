//! Extraction of citation keys from LaTeX sources and of entry keys from an
//! existing BibTeX file.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::key;

lazy_static! {
    // \cite{}, \citep{}, \citet{}, \citealt{}, \citeauthor{}, \Citep{}, ...
    // including optional arguments like \citep[e.g.][]{key}.
    static ref CITE: Regex =
        Regex::new(r"\\[Cc]ite[a-zA-Z]*(?:\[[^\]]*\])*\{([^}]+)\}").unwrap();
    static ref BIB_KEY: Regex = Regex::new(r"@\w+\s*\{\s*([^,\s]+)\s*,").unwrap();
}

/// Scans a LaTeX document for citation commands.
///
/// Returns the raw keys in document order together with validation warnings.
/// Empty list items and keys that match none of the recognized families (no
/// colon, not a bibcode, not an arXiv id) are excluded from the keys and
/// reported as warnings instead. Duplicates are preserved; de-duplication is
/// the caller's concern.
#[must_use]
pub fn cite_keys(document: &str) -> (Vec<String>, Vec<String>) {
    let mut keys = Vec::new();
    let mut warnings = Vec::new();

    for caps in CITE.captures_iter(document) {
        for piece in caps[1].split(',') {
            let key = piece.trim();
            if key.is_empty() {
                warnings.push("Empty citation key found".to_owned());
            } else if !key.contains(':') && !key::is_bibcode(key) && !key::is_arxiv_id(key) {
                warnings.push(format!(
                    "Skipping key '{key}' (not an INSPIRE/ADS/arXiv key)"
                ));
            } else {
                keys.push(key.to_owned());
            }
        }
    }

    (keys, warnings)
}

/// The entry keys already present in the contents of a BibTeX file.
#[must_use]
pub fn existing_bib_keys(content: &str) -> HashSet<String> {
    BIB_KEY
        .captures_iter(content)
        .map(|caps| caps[1].to_owned())
        .collect()
}
