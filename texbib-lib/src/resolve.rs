//! The policy-ordered resolution chain mapping one citation key to BibTeX.
//!
//! Each preferred source defines an ordered attempt sequence across the
//! backends; the chain returns on the first hit and falls through otherwise.
//! Attempts that need an ADS credential are skipped when none is configured
//! rather than sent with an empty token.

use log::trace;
use serde::Deserialize;

use crate::{
    api::{ads, inspire, semantic_scholar, Client},
    key, Error,
};

/// The backend preference driving the attempt order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    /// Prefer the NASA/ADS export service.
    Ads,
    /// Prefer INSPIRE.
    Inspire,
    /// Pick the first backend from the key's classified kind.
    Auto,
    /// Prefer the Semantic Scholar paper graph.
    SemanticScholar,
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ads" => Ok(Self::Ads),
            "inspire" => Ok(Self::Inspire),
            "auto" => Ok(Self::Auto),
            "semantic-scholar" => Ok(Self::SemanticScholar),
            other => Err(format!(
                "unknown source '{other}' (expected ads, inspire, auto or semantic-scholar)"
            )),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Ads => "ads",
            Self::Inspire => "inspire",
            Self::Auto => "auto",
            Self::SemanticScholar => "semantic-scholar",
        })
    }
}

/// A successful resolution: the BibTeX text and the provenance label naming
/// the backend path that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    /// The fetched record, still keyed as the backend returned it.
    pub bibtex: String,
    /// Which backend path satisfied the request, e.g. `ADS via arXiv (2001.01234)`.
    pub provenance: String,
}

impl Resolved {
    fn new<S: Into<String>>(bibtex: String, provenance: S) -> Self {
        Self {
            bibtex,
            provenance: provenance.into(),
        }
    }
}

/// INSPIRE cross-references for the key under resolution, fetched at most
/// once per call and reused by every later attempt that needs them.
#[derive(Default)]
struct CrossRefs {
    cached: Option<(Option<String>, Option<String>)>,
}

impl CrossRefs {
    fn get<C: Client>(&mut self, key: &str) -> Result<(Option<String>, Option<String>), Error> {
        if self.cached.is_none() {
            trace!("Cross-referencing '{key}' through INSPIRE");
            self.cached = Some(inspire::get_ads_info::<C>(key)?);
        }
        Ok(self.cached.clone().unwrap_or_default())
    }
}

/// Resolves `key` using the attempt order of `source`.
///
/// Returns `Ok(None)` only once every applicable attempt has come back
/// empty. ADS attempts are skipped without `ads_api_key`; the Semantic
/// Scholar key is optional at the backend, so its attempts always run.
///
/// # Errors
///
/// An `Err` is returned when a backend reports a rate limit or the transport
/// fails mid-chain. "Not found" is never an error.
pub fn fetch_bibtex<C: Client>(
    key: &str,
    ads_api_key: Option<&str>,
    source: Source,
    ss_api_key: Option<&str>,
) -> Result<Option<Resolved>, Error> {
    trace!("Resolving '{key}' with preferred source '{source}'");
    match source {
        Source::Ads => ads_preferred::<C>(key, ads_api_key, ss_api_key),
        Source::Inspire => inspire_preferred::<C>(key, ads_api_key, ss_api_key),
        Source::Auto => auto::<C>(key, ads_api_key, ss_api_key),
        Source::SemanticScholar => semantic_scholar_preferred::<C>(key, ads_api_key, ss_api_key),
    }
}

fn ads_preferred<C: Client>(
    key: &str,
    ads_api_key: Option<&str>,
    ss_api_key: Option<&str>,
) -> Result<Option<Resolved>, Error> {
    let mut cross_refs = CrossRefs::default();

    if let Some(api_key) = ads_api_key {
        if key::is_bibcode(key) {
            if let Some(bibtex) = ads::get_bibtex::<C>(key, api_key)? {
                return Ok(Some(Resolved::new(bibtex, "ADS (direct)")));
            }
        }

        let (bibcode, arxiv_id) = cross_refs.get::<C>(key)?;
        if let Some(bibcode) = bibcode {
            if let Some(bibtex) = ads::get_bibtex::<C>(&bibcode, api_key)? {
                return Ok(Some(Resolved::new(
                    bibtex,
                    format!("ADS via INSPIRE ({bibcode})"),
                )));
            }
        }
        if let Some(arxiv_id) = arxiv_id {
            if let Some(bibcode) = ads::search_by_arxiv::<C>(&arxiv_id, api_key)? {
                if let Some(bibtex) = ads::get_bibtex::<C>(&bibcode, api_key)? {
                    return Ok(Some(Resolved::new(
                        bibtex,
                        format!("ADS via arXiv ({arxiv_id})"),
                    )));
                }
            }
        }
        if let Some(bibtex) = ads::get_bibtex::<C>(key, api_key)? {
            return Ok(Some(Resolved::new(bibtex, "ADS (direct fallback)")));
        }
    }

    if let Some(bibtex) = inspire::get_bibtex::<C>(key)? {
        return Ok(Some(Resolved::new(bibtex, "INSPIRE (fallback)")));
    }

    if let Some(bibtex) = semantic_scholar::get_bibtex::<C>(key, ss_api_key)? {
        return Ok(Some(Resolved::new(bibtex, "Semantic Scholar (fallback)")));
    }
    let (_, arxiv_id) = cross_refs.get::<C>(key)?;
    if let Some(arxiv_id) = arxiv_id {
        if let Some(bibtex) = semantic_scholar::get_bibtex::<C>(&arxiv_id, ss_api_key)? {
            return Ok(Some(Resolved::new(
                bibtex,
                format!("Semantic Scholar (fallback, via arXiv {arxiv_id})"),
            )));
        }
    }

    Ok(None)
}

fn inspire_preferred<C: Client>(
    key: &str,
    ads_api_key: Option<&str>,
    ss_api_key: Option<&str>,
) -> Result<Option<Resolved>, Error> {
    let mut cross_refs = CrossRefs::default();

    if let Some(bibtex) = inspire::get_bibtex::<C>(key)? {
        return Ok(Some(Resolved::new(bibtex, "INSPIRE")));
    }

    if let Some(api_key) = ads_api_key {
        if key::is_bibcode(key) {
            if let Some(bibtex) = ads::get_bibtex::<C>(key, api_key)? {
                return Ok(Some(Resolved::new(bibtex, "ADS (fallback, direct)")));
            }
        }

        let (bibcode, arxiv_id) = cross_refs.get::<C>(key)?;
        if let Some(bibcode) = bibcode {
            if let Some(bibtex) = ads::get_bibtex::<C>(&bibcode, api_key)? {
                return Ok(Some(Resolved::new(bibtex, "ADS (fallback, via INSPIRE)")));
            }
        }
        if let Some(arxiv_id) = arxiv_id {
            if let Some(bibcode) = ads::search_by_arxiv::<C>(&arxiv_id, api_key)? {
                if let Some(bibtex) = ads::get_bibtex::<C>(&bibcode, api_key)? {
                    return Ok(Some(Resolved::new(bibtex, "ADS (fallback, via arXiv)")));
                }
            }
        }
    }

    if let Some(bibtex) = semantic_scholar::get_bibtex::<C>(key, ss_api_key)? {
        return Ok(Some(Resolved::new(bibtex, "Semantic Scholar (fallback)")));
    }
    let (_, arxiv_id) = cross_refs.get::<C>(key)?;
    if let Some(arxiv_id) = arxiv_id {
        if let Some(bibtex) = semantic_scholar::get_bibtex::<C>(&arxiv_id, ss_api_key)? {
            return Ok(Some(Resolved::new(
                bibtex,
                format!("Semantic Scholar (fallback, via arXiv {arxiv_id})"),
            )));
        }
    }

    Ok(None)
}

fn auto<C: Client>(
    key: &str,
    ads_api_key: Option<&str>,
    ss_api_key: Option<&str>,
) -> Result<Option<Resolved>, Error> {
    let mut cross_refs = CrossRefs::default();

    if key::is_bibcode(key) {
        if let Some(api_key) = ads_api_key {
            if let Some(bibtex) = ads::get_bibtex::<C>(key, api_key)? {
                return Ok(Some(Resolved::new(bibtex, "ADS (auto)")));
            }
        }
        if let Some(bibtex) = inspire::get_bibtex::<C>(key)? {
            return Ok(Some(Resolved::new(bibtex, "INSPIRE (fallback)")));
        }
    } else {
        if let Some(bibtex) = inspire::get_bibtex::<C>(key)? {
            return Ok(Some(Resolved::new(bibtex, "INSPIRE (auto)")));
        }
        if let Some(api_key) = ads_api_key {
            let (bibcode, arxiv_id) = cross_refs.get::<C>(key)?;
            if let Some(bibcode) = bibcode {
                if let Some(bibtex) = ads::get_bibtex::<C>(&bibcode, api_key)? {
                    return Ok(Some(Resolved::new(bibtex, "ADS (fallback, via INSPIRE)")));
                }
            }
            if let Some(arxiv_id) = arxiv_id {
                if let Some(bibcode) = ads::search_by_arxiv::<C>(&arxiv_id, api_key)? {
                    if let Some(bibtex) = ads::get_bibtex::<C>(&bibcode, api_key)? {
                        return Ok(Some(Resolved::new(bibtex, "ADS (fallback, via arXiv)")));
                    }
                }
            }
        }
    }

    if let Some(bibtex) = semantic_scholar::get_bibtex::<C>(key, ss_api_key)? {
        return Ok(Some(Resolved::new(bibtex, "Semantic Scholar (last resort)")));
    }

    Ok(None)
}

fn semantic_scholar_preferred<C: Client>(
    key: &str,
    ads_api_key: Option<&str>,
    ss_api_key: Option<&str>,
) -> Result<Option<Resolved>, Error> {
    let mut cross_refs = CrossRefs::default();

    if let Some(bibtex) = semantic_scholar::get_bibtex::<C>(key, ss_api_key)? {
        return Ok(Some(Resolved::new(bibtex, "Semantic Scholar")));
    }

    let (bibcode, arxiv_id) = cross_refs.get::<C>(key)?;
    if let Some(arxiv_id) = &arxiv_id {
        if let Some(bibtex) = semantic_scholar::get_bibtex::<C>(arxiv_id, ss_api_key)? {
            return Ok(Some(Resolved::new(
                bibtex,
                format!("Semantic Scholar via arXiv ({arxiv_id})"),
            )));
        }
    }

    if let Some(bibtex) = inspire::get_bibtex::<C>(key)? {
        return Ok(Some(Resolved::new(bibtex, "INSPIRE (fallback)")));
    }

    if let Some(api_key) = ads_api_key {
        if key::is_bibcode(key) {
            if let Some(bibtex) = ads::get_bibtex::<C>(key, api_key)? {
                return Ok(Some(Resolved::new(bibtex, "ADS (fallback, direct)")));
            }
        }
        if let Some(bibcode) = bibcode {
            if let Some(bibtex) = ads::get_bibtex::<C>(&bibcode, api_key)? {
                return Ok(Some(Resolved::new(bibtex, "ADS (fallback, via INSPIRE)")));
            }
        }
        if let Some(arxiv_id) = arxiv_id {
            if let Some(bibcode) = ads::search_by_arxiv::<C>(&arxiv_id, api_key)? {
                if let Some(bibtex) = ads::get_bibtex::<C>(&bibcode, api_key)? {
                    return Ok(Some(Resolved::new(bibtex, "ADS (fallback, via arXiv)")));
                }
            }
        }
    }

    Ok(None)
}

/// Resolves an arXiv-id citation key, querying every backend by the arXiv
/// id itself rather than by a texkey.
///
/// The policy ordering of `source` still applies; `auto` behaves like
/// `inspire` here since an arXiv id is never a bibcode.
///
/// # Errors
///
/// As for [`fetch_bibtex`].
pub fn fetch_bibtex_by_arxiv<C: Client>(
    arxiv_id: &str,
    ads_api_key: Option<&str>,
    source: Source,
    ss_api_key: Option<&str>,
) -> Result<Option<Resolved>, Error> {
    trace!("Resolving arXiv id '{arxiv_id}' with preferred source '{source}'");
    match source {
        Source::Ads => {
            if let Some(resolved) = arxiv_via_ads::<C>(arxiv_id, ads_api_key)? {
                return Ok(Some(resolved));
            }
            if let Some(resolved) = arxiv_via_inspire::<C>(arxiv_id)? {
                return Ok(Some(resolved));
            }
            arxiv_via_semantic_scholar::<C>(arxiv_id, ss_api_key)
        }
        Source::Inspire | Source::Auto => {
            if let Some(resolved) = arxiv_via_inspire::<C>(arxiv_id)? {
                return Ok(Some(resolved));
            }
            if let Some(resolved) = arxiv_via_ads::<C>(arxiv_id, ads_api_key)? {
                return Ok(Some(resolved));
            }
            arxiv_via_semantic_scholar::<C>(arxiv_id, ss_api_key)
        }
        Source::SemanticScholar => {
            if let Some(resolved) = arxiv_via_semantic_scholar::<C>(arxiv_id, ss_api_key)? {
                return Ok(Some(resolved));
            }
            if let Some(resolved) = arxiv_via_inspire::<C>(arxiv_id)? {
                return Ok(Some(resolved));
            }
            arxiv_via_ads::<C>(arxiv_id, ads_api_key)
        }
    }
}

fn arxiv_via_ads<C: Client>(
    arxiv_id: &str,
    ads_api_key: Option<&str>,
) -> Result<Option<Resolved>, Error> {
    if let Some(api_key) = ads_api_key {
        if let Some(bibcode) = ads::search_by_arxiv::<C>(arxiv_id, api_key)? {
            if let Some(bibtex) = ads::get_bibtex::<C>(&bibcode, api_key)? {
                return Ok(Some(Resolved::new(
                    bibtex,
                    format!("ADS via arXiv ({arxiv_id})"),
                )));
            }
        }
    }
    Ok(None)
}

fn arxiv_via_inspire<C: Client>(arxiv_id: &str) -> Result<Option<Resolved>, Error> {
    Ok(inspire::get_bibtex_by_arxiv::<C>(arxiv_id)?
        .map(|bibtex| Resolved::new(bibtex, "INSPIRE via arXiv")))
}

fn arxiv_via_semantic_scholar<C: Client>(
    arxiv_id: &str,
    ss_api_key: Option<&str>,
) -> Result<Option<Resolved>, Error> {
    Ok(semantic_scholar::get_bibtex::<C>(arxiv_id, ss_api_key)?
        .map(|bibtex| Resolved::new(bibtex, "Semantic Scholar via arXiv")))
}

#[cfg(test)]
mod tests {
    use super::{fetch_bibtex, fetch_bibtex_by_arxiv, Source};
    use crate::{
        api::{impl_producer, ok_response, status_response, take_request_log, MockClient},
        ErrorKind,
    };

    const INSPIRE_BIBTEX: &str = "@article{Author:2020abc,\n  title={Test},\n}";

    fn wants_bibtex(headers: &[(&str, &str)]) -> bool {
        headers
            .iter()
            .any(|(name, value)| *name == "Accept" && value.contains("x-bibtex"))
    }

    fn ads_export(body: Option<&serde_json::Value>) -> Result<crate::api::Response, crate::Error> {
        // The export echoes the requested bibcode so provenance and rekeying
        // can be checked end to end.
        let bibcode = body
            .and_then(|b| b["bibcode"][0].as_str())
            .unwrap_or_default()
            .to_owned();
        ok_response(&format!(
            "{{\"export\": \"@article{{{bibcode},\\n  title={{Test}},\\n}}\"}}"
        ))
    }

    impl_producer! {
        // Every backend answers: which one wins is purely a question of
        // attempt order.
        AllBackendsProducer => |url, headers, body| {
            if url.contains("adsabs") && url.contains("search") {
                ok_response(r#"{"response": {"docs": [{"bibcode": "2025ApJ...995L..18A"}]}}"#)
            } else if url.contains("adsabs") {
                ads_export(body)
            } else if url.contains("semanticscholar") {
                ok_response(
                    r#"{"citationStyles": {"bibtex": "@article{SS,\n  title={Test},\n}"}}"#,
                )
            } else if wants_bibtex(headers) {
                ok_response("@article{Author:2020abc,\n  title={Test},\n}")
            } else {
                ok_response(r#"{"hits": {"hits": []}}"#)
            }
        },
        InspireOnlyProducer => |url, headers, _| {
            if url.contains("inspirehep") && wants_bibtex(headers) {
                ok_response("@article{Author:2020abc,\n  title={Test},\n}")
            } else {
                status_response(404)
            }
        },
        NothingProducer => |_, _, _| status_response(404),
        // INSPIRE knows the cross-references but has no BibTeX of its own;
        // only ADS resolves.
        CrossRefToAdsProducer => |url, headers, body| {
            if url.contains("inspirehep") && !wants_bibtex(headers) {
                ok_response(
                    r#"{"hits": {"hits": [{"metadata": {
                        "external_system_identifiers": [{"schema": "ADS", "value": "2025ApJ...995L..18A"}],
                        "arxiv_eprints": [{"value": "2508.18080"}]
                    }}]}}"#,
                )
            } else if url.contains("adsabs") && url.contains("search") {
                ok_response(r#"{"response": {"docs": [{"bibcode": "2025ApJ...995L..18A"}]}}"#)
            } else if url.contains("adsabs") {
                ads_export(body)
            } else {
                status_response(404)
            }
        },
        SemanticScholarRateLimitProducer => |url, _, _| {
            if url.contains("semanticscholar") {
                status_response(429)
            } else {
                status_response(404)
            }
        },
    }

    #[test]
    fn ads_preferred_bibcode_goes_to_ads_first() {
        take_request_log();
        let resolved = fetch_bibtex::<MockClient<AllBackendsProducer>>(
            "2016PhRvL.116f1102A",
            Some("token"),
            Source::Ads,
            None,
        )
        .unwrap()
        .expect("should resolve");
        assert_eq!("ADS (direct)", resolved.provenance);
        assert!(resolved.bibtex.starts_with("@article{2016PhRvL.116f1102A,"));

        let log = take_request_log();
        assert!(log[0].contains("adsabs"));
    }

    #[test]
    fn ads_preferred_without_key_skips_ads_entirely() {
        take_request_log();
        let resolved = fetch_bibtex::<MockClient<AllBackendsProducer>>(
            "Author:2020abc",
            None,
            Source::Ads,
            None,
        )
        .unwrap()
        .expect("should resolve");
        assert_eq!("INSPIRE (fallback)", resolved.provenance);

        let log = take_request_log();
        assert!(log.iter().all(|url| !url.contains("adsabs")));
    }

    #[test]
    fn ads_preferred_resolves_through_cross_reference() {
        take_request_log();
        let resolved = fetch_bibtex::<MockClient<CrossRefToAdsProducer>>(
            "Author:2020abc",
            Some("token"),
            Source::Ads,
            None,
        )
        .unwrap()
        .expect("should resolve");
        assert_eq!(
            "ADS via INSPIRE (2025ApJ...995L..18A)",
            resolved.provenance
        );
        assert!(resolved
            .bibtex
            .starts_with("@article{2025ApJ...995L..18A,"));
    }

    #[test]
    fn inspire_preferred_tries_inspire_first() {
        take_request_log();
        let resolved = fetch_bibtex::<MockClient<AllBackendsProducer>>(
            "Author:2020abc",
            Some("token"),
            Source::Inspire,
            None,
        )
        .unwrap()
        .expect("should resolve");
        assert_eq!("INSPIRE", resolved.provenance);
        assert_eq!(INSPIRE_BIBTEX, resolved.bibtex);

        let log = take_request_log();
        assert!(log[0].contains("inspirehep"));
    }

    #[test]
    fn inspire_preferred_falls_back_to_ads_direct_for_bibcode() {
        let resolved = fetch_bibtex::<MockClient<CrossRefToAdsProducer>>(
            "2025ApJ...995L..18A",
            Some("token"),
            Source::Inspire,
            None,
        )
        .unwrap()
        .expect("should resolve");
        assert_eq!("ADS (fallback, direct)", resolved.provenance);
    }

    #[test]
    fn auto_tries_ads_before_inspire_for_bibcode_keys() {
        take_request_log();
        let _ = fetch_bibtex::<MockClient<NothingProducer>>(
            "2016PhRvL.116f1102A",
            Some("token"),
            Source::Auto,
            None,
        )
        .unwrap();

        let log = take_request_log();
        let first_ads = log.iter().position(|url| url.contains("adsabs"));
        let first_inspire = log.iter().position(|url| url.contains("inspirehep"));
        assert!(first_ads.is_some() && first_inspire.is_some(), "{log:?}");
        assert!(first_ads < first_inspire, "ADS must be attempted first: {log:?}");
    }

    #[test]
    fn auto_tries_inspire_before_ads_for_inspire_keys() {
        take_request_log();
        let _ = fetch_bibtex::<MockClient<NothingProducer>>(
            "Author:2020abc",
            Some("token"),
            Source::Auto,
            None,
        )
        .unwrap();

        let log = take_request_log();
        let first_inspire = log.iter().position(|url| url.contains("inspirehep"));
        let first_ads = log.iter().position(|url| url.contains("adsabs"));
        assert!(first_inspire.is_some(), "{log:?}");
        assert!(
            first_ads.is_none() || first_inspire < first_ads,
            "INSPIRE must be attempted first: {log:?}"
        );
    }

    #[test]
    fn auto_finishes_with_semantic_scholar() {
        take_request_log();
        let _ = fetch_bibtex::<MockClient<NothingProducer>>(
            "Author:2020abc",
            Some("token"),
            Source::Auto,
            None,
        )
        .unwrap();

        let log = take_request_log();
        assert!(
            log.last().map_or(false, |url| url.contains("semanticscholar")),
            "Semantic Scholar must be the last resort: {log:?}"
        );
    }

    #[test]
    fn semantic_scholar_preferred_tries_the_graph_first() {
        take_request_log();
        let resolved = fetch_bibtex::<MockClient<AllBackendsProducer>>(
            "Author:2020abc",
            Some("token"),
            Source::SemanticScholar,
            Some("ss-token"),
        )
        .unwrap()
        .expect("should resolve");
        assert_eq!("Semantic Scholar", resolved.provenance);

        let log = take_request_log();
        assert!(log[0].contains("semanticscholar"));
    }

    #[test]
    fn cross_references_fetched_at_most_once() {
        take_request_log();
        let _ = fetch_bibtex::<MockClient<NothingProducer>>(
            "Author:2020abc",
            Some("token"),
            Source::Inspire,
            None,
        )
        .unwrap();

        let log = take_request_log();
        let texkey_requests = log
            .iter()
            .filter(|url| url.contains("q=texkeys:"))
            .count();
        // One BibTeX fetch plus one cross-reference lookup; a second
        // cross-reference fetch would make it three.
        assert_eq!(2, texkey_requests, "{log:?}");
    }

    #[test]
    fn exhausted_chain_is_not_found() {
        let result = fetch_bibtex::<MockClient<NothingProducer>>(
            "Author:2020abc",
            Some("token"),
            Source::Ads,
            None,
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn rate_limit_mid_chain_propagates() {
        let err = fetch_bibtex::<MockClient<SemanticScholarRateLimitProducer>>(
            "Author:2020abc",
            None,
            Source::Inspire,
            None,
        )
        .expect_err("429 must propagate out of the chain");
        assert_eq!(ErrorKind::RateLimit, err.kind());
    }

    #[test]
    fn arxiv_variant_prefers_inspire_for_inspire_policy() {
        take_request_log();
        let resolved = fetch_bibtex_by_arxiv::<MockClient<InspireOnlyProducer>>(
            "2508.18080",
            None,
            Source::Inspire,
            None,
        )
        .unwrap()
        .expect("should resolve");
        assert_eq!("INSPIRE via arXiv", resolved.provenance);

        let log = take_request_log();
        assert_eq!(
            "https://inspirehep.net/api/literature?q=arxiv:2508.18080",
            log[0]
        );
    }

    #[test]
    fn arxiv_variant_prefers_ads_for_ads_policy() {
        take_request_log();
        let resolved = fetch_bibtex_by_arxiv::<MockClient<AllBackendsProducer>>(
            "2508.18080",
            Some("token"),
            Source::Ads,
            None,
        )
        .unwrap()
        .expect("should resolve");
        assert_eq!("ADS via arXiv (2508.18080)", resolved.provenance);

        let log = take_request_log();
        assert!(log[0].contains("adsabs"));
    }

    #[test]
    fn arxiv_variant_skips_ads_without_credential() {
        take_request_log();
        let result = fetch_bibtex_by_arxiv::<MockClient<NothingProducer>>(
            "2508.18080",
            None,
            Source::Ads,
            None,
        )
        .unwrap();
        assert!(result.is_none());

        let log = take_request_log();
        assert!(log.iter().all(|url| !url.contains("adsabs")));
    }
}
