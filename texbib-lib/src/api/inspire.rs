use log::trace;
use serde::Deserialize;

use crate::{Error, ErrorKind};

use super::{reject_rate_limited, Client};

const INSPIRE_API_URL: &str = "https://inspirehep.net/api/literature";

/// Fetches BibTeX for an INSPIRE texkey.
///
/// A non-2xx status or a blank body means the key is unknown to INSPIRE and
/// yields `Ok(None)`.
pub(crate) fn get_bibtex<C: Client>(key: &str) -> Result<Option<String>, Error> {
    // texkeys: avoids the colon in the key being read as a field operator.
    get_bibtex_text::<C>(&format!("{INSPIRE_API_URL}?q=texkeys:{key}"))
}

/// Fetches BibTeX for the record matching an arXiv identifier.
pub(crate) fn get_bibtex_by_arxiv<C: Client>(arxiv_id: &str) -> Result<Option<String>, Error> {
    get_bibtex_text::<C>(&format!("{INSPIRE_API_URL}?q=arxiv:{arxiv_id}"))
}

fn get_bibtex_text<C: Client>(url: &str) -> Result<Option<String>, Error> {
    trace!("Requesting BibTeX from INSPIRE: {url}");
    let response = C::default().get(url, &[("Accept", "application/x-bibtex")])?;
    reject_rate_limited("INSPIRE", &response)?;

    let body = response.body().trim();
    if response.is_success() && !body.is_empty() {
        Ok(Some(body.to_owned()))
    } else {
        Ok(None)
    }
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(default)]
    hits: Hits,
}

#[derive(Deserialize, Default)]
struct Hits {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct Hit {
    #[serde(default)]
    metadata: Metadata,
}

#[derive(Deserialize, Default)]
struct Metadata {
    #[serde(default)]
    external_system_identifiers: Vec<ExternalId>,
    #[serde(default)]
    arxiv_eprints: Vec<Eprint>,
}

#[derive(Deserialize)]
struct ExternalId {
    #[serde(default)]
    schema: String,
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
struct Eprint {
    #[serde(default)]
    value: String,
}

/// The ADS bibcode and arXiv id INSPIRE cross-references for a texkey.
///
/// Either element may be absent; an unknown key yields `(None, None)`.
pub(crate) fn get_ads_info<C: Client>(
    key: &str,
) -> Result<(Option<String>, Option<String>), Error> {
    let url = format!("{INSPIRE_API_URL}?q=texkeys:{key}");
    trace!("Requesting cross-references from INSPIRE: {url}");
    let response = C::default().get(&url, &[("Accept", "application/json")])?;
    reject_rate_limited("INSPIRE", &response)?;

    if !response.is_success() {
        return Ok((None, None));
    }

    let result: SearchResult = serde_json::from_str(response.body())
        .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))?;
    let hit = match result.hits.hits.into_iter().next() {
        Some(hit) => hit,
        None => return Ok((None, None)),
    };

    let bibcode = hit
        .metadata
        .external_system_identifiers
        .into_iter()
        .find(|id| id.schema == "ADS")
        .map(|id| id.value);
    let arxiv_id = hit.metadata.arxiv_eprints.into_iter().next().map(|e| e.value);

    Ok((bibcode, arxiv_id))
}
