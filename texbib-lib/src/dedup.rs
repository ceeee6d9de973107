//! Detection of the same paper fetched under different citation keys.
//!
//! One paper is often cited as an INSPIRE texkey in one file, a bibcode in
//! another and an arXiv id in a third. The ledger tracks the identifiers of
//! every admitted record so later keys resolving to the same paper can be
//! dropped and reported instead of duplicated in the output.

use std::collections::HashMap;

use log::trace;

use crate::bibtex;

/// The identifier that exposed a re-fetch of an already claimed paper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DuplicateReason {
    /// The fetched record's own entry key was already claimed.
    EntryKey(String),
    /// The fetched record's arXiv eprint was already claimed.
    Eprint(String),
    /// The fetched record's DOI was already claimed.
    Doi(String),
}

impl std::fmt::Display for DuplicateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntryKey(key) => write!(f, "same entry key '{key}'"),
            Self::Eprint(eprint) => write!(f, "same arXiv eprint '{eprint}'"),
            Self::Doi(doi) => write!(f, "same DOI '{doi}'"),
        }
    }
}

/// A dropped re-fetch of a paper claimed by an earlier citation key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Duplicate {
    /// The citation key whose record was dropped.
    pub key: String,
    /// The earlier citation key that claimed the paper.
    pub existing_key: String,
    /// The identifier that matched.
    pub reason: DuplicateReason,
}

/// Identifiers claimed so far in one run, each mapped to the claiming
/// citation key.
///
/// Claims are monotonic: the first claimant wins and entries are never
/// overwritten or removed.
#[derive(Debug, Default)]
pub struct ProvenanceLedger {
    entry_keys: HashMap<String, String>,
    eprints: HashMap<String, String>,
    dois: HashMap<String, String>,
}

impl ProvenanceLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks `record` against the ledger and, when the paper is new, claims
    /// its identifiers for `cite_key`.
    ///
    /// Membership is checked in priority order: the record's own entry key,
    /// then its arXiv eprint, then its DOI. On a hit the ledger is left
    /// untouched and the duplicate is returned for reporting.
    pub fn claim(&mut self, cite_key: &str, record: &str) -> Option<Duplicate> {
        let entry_key = bibtex::entry_key(record);
        let found = bibtex::fields(record, &["eprint", "doi"]);
        let eprint = found.get("eprint").filter(|value| !value.is_empty());
        let doi = found.get("doi").filter(|value| !value.is_empty());

        if let Some(key) = &entry_key {
            if let Some(existing) = self.entry_keys.get(key) {
                return Some(Duplicate {
                    key: cite_key.to_owned(),
                    existing_key: existing.clone(),
                    reason: DuplicateReason::EntryKey(key.clone()),
                });
            }
        }
        if let Some(eprint) = eprint {
            if let Some(existing) = self.eprints.get(eprint) {
                return Some(Duplicate {
                    key: cite_key.to_owned(),
                    existing_key: existing.clone(),
                    reason: DuplicateReason::Eprint(eprint.clone()),
                });
            }
        }
        if let Some(doi) = doi {
            if let Some(existing) = self.dois.get(doi) {
                return Some(Duplicate {
                    key: cite_key.to_owned(),
                    existing_key: existing.clone(),
                    reason: DuplicateReason::Doi(doi.clone()),
                });
            }
        }

        if let Some(key) = entry_key {
            self.entry_keys.insert(key, cite_key.to_owned());
        }
        if let Some(eprint) = eprint {
            self.eprints.insert(eprint.clone(), cite_key.to_owned());
        }
        if let Some(doi) = doi {
            self.dois.insert(doi.clone(), cite_key.to_owned());
        }
        trace!("'{cite_key}' claimed its identifiers");
        None
    }
}
