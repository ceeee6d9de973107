use log::trace;
use serde::Deserialize;
use serde_json::json;

use crate::{Error, ErrorKind};

use super::{reject_rate_limited, Client};

const ADS_EXPORT_URL: &str = "https://api.adsabs.harvard.edu/v1/export/bibtex";
const ADS_SEARCH_URL: &str = "https://api.adsabs.harvard.edu/v1/search/query";

#[derive(Deserialize)]
struct ExportResult {
    #[serde(default)]
    export: String,
}

/// Exports BibTeX for a bibcode.
///
/// ADS reports an unknown bibcode with a 200 response whose export text
/// starts with "No records"; that and a blank export both yield `Ok(None)`.
pub(crate) fn get_bibtex<C: Client>(bibcode: &str, api_key: &str) -> Result<Option<String>, Error> {
    trace!("Exporting bibcode '{bibcode}' from ADS");
    let auth = format!("Bearer {api_key}");
    let body = json!({ "bibcode": [bibcode] });
    let response = C::default().post_json(ADS_EXPORT_URL, &[("Authorization", &auth)], &body)?;
    reject_rate_limited("ADS", &response)?;

    if !response.is_success() {
        return Ok(None);
    }

    let result: ExportResult = serde_json::from_str(response.body())
        .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))?;
    let export = result.export.trim();
    if export.is_empty() || export.starts_with("No records") {
        Ok(None)
    } else {
        Ok(Some(export.to_owned()))
    }
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(default)]
    response: SearchBody,
}

#[derive(Deserialize, Default)]
struct SearchBody {
    #[serde(default)]
    docs: Vec<Doc>,
}

#[derive(Deserialize)]
struct Doc {
    bibcode: Option<String>,
}

/// Searches ADS for a paper by arXiv identifier and returns its bibcode.
pub(crate) fn search_by_arxiv<C: Client>(
    arxiv_id: &str,
    api_key: &str,
) -> Result<Option<String>, Error> {
    let url = format!("{ADS_SEARCH_URL}?q=arXiv:{arxiv_id}&fl=bibcode");
    trace!("Searching ADS for arXiv id '{arxiv_id}'");
    let auth = format!("Bearer {api_key}");
    let response = C::default().get(&url, &[("Authorization", &auth)])?;
    reject_rate_limited("ADS", &response)?;

    if !response.is_success() {
        return Ok(None);
    }

    let result: SearchResult = serde_json::from_str(response.body())
        .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))?;
    Ok(result
        .response
        .docs
        .into_iter()
        .next()
        .and_then(|doc| doc.bibcode))
}
