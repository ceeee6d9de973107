//! Per-run aggregation: resolves citation keys one at a time and accumulates
//! the output entries.

use std::marker::PhantomData;

use log::trace;

use crate::{
    api::Client,
    bibtex,
    dedup::{Duplicate, ProvenanceLedger},
    key::{self, KeyKind},
    resolve::{self, Source},
    Error,
};

/// Options shared by every key in a run.
#[derive(Clone, Debug)]
pub struct BatchOptions {
    /// The backend preference policy.
    pub source: Source,
    /// ADS credential; ADS attempts are skipped without it.
    pub ads_api_key: Option<String>,
    /// Semantic Scholar credential (optional at the backend).
    pub ss_api_key: Option<String>,
    /// Author-list truncation limit, 0 for unlimited.
    pub max_authors: usize,
}

/// What happened to a single citation key.
#[derive(Debug)]
pub enum KeyOutcome {
    /// The record was fetched and admitted to the output set.
    Added {
        /// The backend path that satisfied the request.
        provenance: String,
    },
    /// The record resolved to a paper already claimed by an earlier key.
    Duplicate(Duplicate),
    /// Every applicable backend attempt came back empty.
    NotFound,
}

/// Accumulates resolved entries for one run.
///
/// The batch owns the run's [`ProvenanceLedger`], so all cross-key state is
/// threaded through this one value rather than living in globals. Keys are
/// resolved strictly one at a time; a failed key leaves the batch usable for
/// the rest.
pub struct Batch<C: Client> {
    options: BatchOptions,
    ledger: ProvenanceLedger,
    entries: Vec<String>,
    _client: PhantomData<C>,
}

impl<C: Client> Batch<C> {
    /// Creates an empty batch.
    #[must_use]
    pub fn new(options: BatchOptions) -> Self {
        Self {
            options,
            ledger: ProvenanceLedger::new(),
            entries: Vec::new(),
            _client: PhantomData,
        }
    }

    /// Resolves one citation key and folds the result into the batch.
    ///
    /// Keys classified as arXiv ids keep the fetched record under its own
    /// entry key and gain a `@misc` crossref stub for the arXiv id; all
    /// other keys have the record rekeyed to the citation key itself.
    ///
    /// # Errors
    ///
    /// An `Err` (rate limit, transport failure) aborts only this key.
    pub fn add_key(&mut self, cite_key: &str) -> Result<KeyOutcome, Error> {
        let kind = key::classify(cite_key);
        trace!("Resolving '{cite_key}' (classified as {kind:?})");

        let resolved = if kind == KeyKind::Arxiv {
            resolve::fetch_bibtex_by_arxiv::<C>(
                cite_key,
                self.options.ads_api_key.as_deref(),
                self.options.source,
                self.options.ss_api_key.as_deref(),
            )?
        } else {
            resolve::fetch_bibtex::<C>(
                cite_key,
                self.options.ads_api_key.as_deref(),
                self.options.source,
                self.options.ss_api_key.as_deref(),
            )?
        };

        let resolved = match resolved {
            Some(resolved) => resolved,
            None => return Ok(KeyOutcome::NotFound),
        };

        if let Some(duplicate) = self.ledger.claim(cite_key, &resolved.bibtex) {
            return Ok(KeyOutcome::Duplicate(duplicate));
        }

        match (kind, bibtex::entry_key(&resolved.bibtex)) {
            (KeyKind::Arxiv, Some(natural_key)) => {
                self.push_entry(&resolved.bibtex);
                self.entries
                    .push(bibtex::crossref_stub(cite_key, &natural_key));
            }
            // Without an extractable entry key there is nothing to point a
            // stub at, so the arXiv id becomes the entry key like any other
            // citation key.
            _ => {
                let rekeyed = bibtex::replace_entry_key(&resolved.bibtex, cite_key);
                self.push_entry(&rekeyed);
            }
        }

        Ok(KeyOutcome::Added {
            provenance: resolved.provenance,
        })
    }

    fn push_entry(&mut self, record: &str) {
        self.entries
            .push(bibtex::truncate_authors(record, self.options.max_authors));
    }

    /// The entries admitted so far, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Consumes the batch, returning the entries for writing.
    #[must_use]
    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::{Batch, BatchOptions, KeyOutcome};
    use crate::{
        api::{impl_producer, ok_response, status_response, MockClient},
        extract, ErrorKind, Source,
    };

    fn options(source: Source) -> BatchOptions {
        BatchOptions {
            source,
            ads_api_key: None,
            ss_api_key: None,
            max_authors: 3,
        }
    }

    fn wants_bibtex(headers: &[(&str, &str)]) -> bool {
        headers
            .iter()
            .any(|(name, value)| *name == "Accept" && value.contains("x-bibtex"))
    }

    impl_producer! {
        // INSPIRE answers BibTeX requests with a fixed record whose natural
        // key differs from most citation keys used in the tests.
        InspireRecordProducer => |url, headers, _| {
            if url.contains("inspirehep") && wants_bibtex(headers) {
                ok_response(
                    "@article{LIGOScientific:2025hdt,\n    \
                     author = \"Abac, A. G. and others\",\n    \
                     eprint = \"2508.18080\",\n    \
                     doi = \"10.3847/2041-8213/ae0c06\",\n    \
                     title = \"{GW250114}\"\n}",
                )
            } else {
                status_response(404)
            }
        },
        SimpleRecordProducer => |url, headers, _| {
            if url.contains("inspirehep") && wants_bibtex(headers) {
                ok_response("@article{Author:2020abc,\n  title={Test},\n  author={Doe, J.},\n}")
            } else {
                status_response(404)
            }
        },
        ManyAuthorsProducer => |url, headers, _| {
            if url.contains("inspirehep") && wants_bibtex(headers) {
                ok_response(
                    "@article{Author:2020abc,\n  \
                     author={Alpha, A. and Beta, B. and Gamma, G. and Delta, D. and Epsilon, E.},\n  \
                     title={Test},\n}",
                )
            } else {
                status_response(404)
            }
        },
        NothingProducer => |_, _, _| status_response(404),
        RateLimitedGraphProducer => |url, _, _| {
            if url.contains("semanticscholar") {
                status_response(429)
            } else {
                status_response(404)
            }
        },
    }

    #[test]
    fn document_key_ends_up_under_its_own_key() {
        // The whole pipeline for the simple case: extract, resolve, rekey.
        let (keys, warnings) = extract::cite_keys(r"\cite{Author:2020abc}");
        assert!(warnings.is_empty());

        let mut batch = Batch::<MockClient<SimpleRecordProducer>>::new(options(Source::Inspire));
        for key in &keys {
            let outcome = batch.add_key(key).unwrap();
            assert!(matches!(
                outcome,
                KeyOutcome::Added { ref provenance } if provenance == "INSPIRE"
            ));
        }

        let entries = batch.into_entries();
        assert_eq!(1, entries.len());
        assert!(entries[0].starts_with("@article{Author:2020abc,"));
    }

    #[test]
    fn rekeys_record_to_the_citation_key() {
        let mut batch = Batch::<MockClient<InspireRecordProducer>>::new(options(Source::Inspire));
        batch.add_key("Abbott:2025xyz").unwrap();

        let entries = batch.entries();
        assert_eq!(1, entries.len());
        assert!(entries[0].starts_with("@article{Abbott:2025xyz,"));
        assert!(entries[0].contains("eprint = \"2508.18080\""));
    }

    #[test]
    fn arxiv_key_keeps_natural_key_and_adds_stub() {
        let mut batch = Batch::<MockClient<InspireRecordProducer>>::new(options(Source::Inspire));
        let outcome = batch.add_key("2508.18080").unwrap();
        assert!(matches!(
            outcome,
            KeyOutcome::Added { ref provenance } if provenance == "INSPIRE via arXiv"
        ));

        let entries = batch.entries();
        assert_eq!(2, entries.len());
        assert!(entries[0].starts_with("@article{LIGOScientific:2025hdt,"));
        assert_eq!(
            "@misc{2508.18080,\n    crossref = {LIGOScientific:2025hdt}\n}",
            entries[1]
        );
    }

    #[test]
    fn second_key_for_the_same_paper_is_dropped() {
        let mut batch = Batch::<MockClient<InspireRecordProducer>>::new(options(Source::Inspire));
        batch.add_key("2508.18080").unwrap();

        let outcome = batch.add_key("LIGOScientific:2025hdt").unwrap();
        match outcome {
            KeyOutcome::Duplicate(duplicate) => {
                assert_eq!("LIGOScientific:2025hdt", duplicate.key);
                assert_eq!("2508.18080", duplicate.existing_key);
            }
            other => panic!("expected a duplicate, got {other:?}"),
        }

        // Only the first key's entry and its stub made it in.
        assert_eq!(2, batch.entries().len());
    }

    #[test]
    fn authors_truncated_on_the_way_in() {
        let mut batch = Batch::<MockClient<ManyAuthorsProducer>>::new(options(Source::Inspire));
        batch.add_key("Author:2020abc").unwrap();

        let entries = batch.entries();
        assert!(entries[0].contains("Alpha, A. and Beta, B. and Gamma, G. and others"));
        assert!(!entries[0].contains("Delta"));
    }

    #[test]
    fn unresolvable_key_is_not_found() {
        let mut batch = Batch::<MockClient<NothingProducer>>::new(options(Source::Inspire));
        let outcome = batch.add_key("Author:2020abc").unwrap();
        assert!(matches!(outcome, KeyOutcome::NotFound));
        assert!(batch.entries().is_empty());
    }

    #[test]
    fn failed_key_leaves_the_batch_usable() {
        let mut batch =
            Batch::<MockClient<RateLimitedGraphProducer>>::new(options(Source::Inspire));
        let err = batch
            .add_key("Author:2020abc")
            .expect_err("rate limit must surface per key");
        assert_eq!(ErrorKind::RateLimit, err.kind());

        // The next key still goes through the whole chain.
        let err = batch.add_key("Other:2021xyz").unwrap_err();
        assert_eq!(ErrorKind::RateLimit, err.kind());
        assert!(batch.entries().is_empty());
    }
}
