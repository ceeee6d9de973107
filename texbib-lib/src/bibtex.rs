//! Best-effort text transforms over single BibTeX records.
//!
//! None of these parse BibTeX properly. Every transform targets one field by
//! pattern and leaves the rest of the record byte-for-byte untouched, which
//! is exactly what is wanted when the record came from a backend whose
//! formatting should be preserved.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref ENTRY_KEY: Regex = Regex::new(r"(@\w+\s*\{)\s*([^,\s]+)\s*,").unwrap();
    static ref FIELD: Regex =
        Regex::new(r#"(?i)(\w+)\s*=\s*(?:"([^"]*)"|\{([^{}]*)\})"#).unwrap();
    // The author value may span lines; it ends at `}` plus optional comma
    // and the line break.
    static ref AUTHOR_FIELD: Regex =
        Regex::new(r"(?is)(\s*author\s*=\s*\{)(.+?)(\},?\s*\n)").unwrap();
    static ref AND_SEP: Regex = Regex::new(r"\s+and\s+").unwrap();
}

/// The record's own entry key: the token between the opening brace of
/// `@<type>{` and the first following comma.
#[must_use]
pub fn entry_key(record: &str) -> Option<String> {
    ENTRY_KEY.captures(record).map(|caps| caps[2].to_owned())
}

/// Extracts the first occurrence of each requested field.
///
/// Handles `name = "value"` and `name = {value}` forms case-insensitively,
/// as long as the value has no nested quote or brace. Names without a match
/// are omitted; map keys are lowercased.
#[must_use]
pub fn fields(record: &str, names: &[&str]) -> HashMap<String, String> {
    let mut found = HashMap::new();
    for caps in FIELD.captures_iter(record) {
        let name = caps[1].to_lowercase();
        if !names.iter().any(|n| n.eq_ignore_ascii_case(&name)) || found.contains_key(&name) {
            continue;
        }
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map_or("", |m| m.as_str());
        found.insert(name, value.trim().to_owned());
    }
    found
}

/// Rewrites the entry key of the first `@type{key,` opening to `new_key`.
///
/// All other text is untouched, including later occurrences of the old key
/// inside the record body. The replacement is inserted literally, so keys
/// starting with digits (`2025ApJ...995L..18A`) or containing backslashes
/// cannot corrupt the output.
#[must_use]
pub fn replace_entry_key(record: &str, new_key: &str) -> String {
    ENTRY_KEY
        .replace(record, |caps: &Captures<'_>| format!("{}{new_key},", &caps[1]))
        .into_owned()
}

/// Truncates the `author` field to `max_authors` names followed by the
/// literal author `others`.
///
/// A `max_authors` of 0 disables truncation, and records whose author count
/// is already within the limit (or that have no author field) are returned
/// unchanged.
#[must_use]
pub fn truncate_authors(record: &str, max_authors: usize) -> String {
    if max_authors == 0 {
        return record.to_owned();
    }

    AUTHOR_FIELD
        .replace(record, |caps: &Captures<'_>| {
            let authors: Vec<&str> = AND_SEP.split(&caps[2]).map(str::trim).collect();
            if authors.len() <= max_authors {
                caps[0].to_owned()
            } else {
                let mut kept = authors[..max_authors].to_vec();
                kept.push("others");
                format!("{}{}{}", &caps[1], kept.join(" and "), &caps[3])
            }
        })
        .into_owned()
}

/// Builds a minimal `@misc` entry pointing `primary_id` at `target_key`.
///
/// Used when an arXiv-id citation key resolved to a record carrying its own
/// entry key: the stub keeps the user's original `\cite` argument navigable
/// while crossref-pointing at the authoritative entry.
#[must_use]
pub fn crossref_stub(primary_id: &str, target_key: &str) -> String {
    format!("@misc{{{primary_id},\n    crossref = {{{target_key}}}\n}}")
}
