use log::trace;
use serde::Deserialize;

use crate::{Error, ErrorKind};

use super::{reject_rate_limited, Client};

const GRAPH_API_URL: &str = "https://api.semanticscholar.org/graph/v1/paper";

#[derive(Deserialize)]
struct PaperResult {
    #[serde(rename = "citationStyles")]
    citation_styles: Option<CitationStyles>,
}

#[derive(Deserialize)]
struct CitationStyles {
    bibtex: Option<String>,
}

/// Fetches BibTeX from the Semantic Scholar paper graph.
///
/// The id is tried as an arXiv identifier first (`ARXIV:<id>`) and as a raw
/// paper id (DOI or native id) second; the first non-blank
/// `citationStyles.bibtex` wins. The API key is optional and sent as an
/// `x-api-key` header when present.
pub(crate) fn get_bibtex<C: Client>(
    id: &str,
    api_key: Option<&str>,
) -> Result<Option<String>, Error> {
    let client = C::default();
    let mut headers = Vec::new();
    if let Some(key) = api_key {
        headers.push(("x-api-key", key));
    }

    for paper_id in [format!("ARXIV:{id}"), id.to_owned()] {
        let url = format!("{GRAPH_API_URL}/{paper_id}?fields=citationStyles");
        trace!("Requesting BibTeX from Semantic Scholar: {url}");
        let response = client.get(&url, &headers)?;
        reject_rate_limited("Semantic Scholar", &response)?;

        if !response.is_success() {
            continue;
        }

        let result: PaperResult = serde_json::from_str(response.body())
            .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))?;
        if let Some(bibtex) = result.citation_styles.and_then(|styles| styles.bibtex) {
            let bibtex = bibtex.trim();
            if !bibtex.is_empty() {
                return Ok(Some(bibtex.to_owned()));
            }
        }
    }

    Ok(None)
}
