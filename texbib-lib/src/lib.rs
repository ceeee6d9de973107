#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]
#![doc = include_str!("../README.md")]

pub mod api;
pub mod batch;
pub mod bibtex;
pub mod dedup;
mod error;
pub mod extract;
pub mod key;
pub mod resolve;

pub use error::{Error, ErrorKind};
pub use resolve::{Resolved, Source};

use log::trace;

/// The blocking HTTP client used for real requests.
pub type HttpClient = reqwest::blocking::Client;

/// Resolves a citation key to BibTeX using the default HTTP client.
///
/// The `source` policy fixes the order in which INSPIRE, ADS and Semantic
/// Scholar are attempted; see [`resolve::fetch_bibtex`] for the exact
/// sequences and credential handling.
///
/// # Errors
///
/// An `Err` is returned when a backend reports a rate limit or the transport
/// fails mid-chain; an exhausted chain is `Ok(None)`, not an error.
#[inline]
pub fn fetch_bibtex(
    key: &str,
    ads_api_key: Option<&str>,
    source: Source,
    ss_api_key: Option<&str>,
) -> Result<Option<Resolved>, Error> {
    trace!("Fetch BibTeX for citation key '{key}'");
    resolve::fetch_bibtex::<HttpClient>(key, ads_api_key, source, ss_api_key)
}

/// Resolves an arXiv-id citation key using the default HTTP client.
///
/// The arXiv id is the lookup token at every backend; the fetched record
/// keeps whatever entry key the backend returned.
///
/// # Errors
///
/// As for [`fetch_bibtex`].
#[inline]
pub fn fetch_bibtex_by_arxiv(
    arxiv_id: &str,
    ads_api_key: Option<&str>,
    source: Source,
    ss_api_key: Option<&str>,
) -> Result<Option<Resolved>, Error> {
    trace!("Fetch BibTeX for arXiv id '{arxiv_id}'");
    resolve::fetch_bibtex_by_arxiv::<HttpClient>(arxiv_id, ads_api_key, source, ss_api_key)
}
