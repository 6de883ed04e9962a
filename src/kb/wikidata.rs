//! Wikidata / Wikipedia knowledge-base client.
//!
//! - Club list: SPARQL over association football clubs (Q476028) in the
//!   Bundesliga (Q82595) with their headquarters city (P159).
//! - Club search: English label/alias containment, requiring a head coach
//!   (P286).
//! - Background text: `wbgetentities` sitelinks, then the English Wikipedia
//!   intro extract.
//!
//! All calls are blocking (`ureq`) with the configured timeout.

use std::collections::HashMap;
use std::time::Duration;

use gaffer_core::{ClubInfo, Error, Result, UNKNOWN_MANAGER};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::{ClubRecord, GazetteerSource, KnowledgeBase};
use crate::config::WikidataConfig;

/// Upper bound on SPARQL search results regardless of configuration.
const MAX_SEARCH_LIMIT: usize = 10;

const ARTICLE_BASE: &str = "https://en.wikipedia.org/wiki/";

const CLUBS_QUERY: &str = r#"
SELECT ?club ?clubLabel ?clubCity ?clubCityLabel WHERE {
  ?club wdt:P31 wd:Q476028;
        wdt:P118 wd:Q82595;
        wdt:P159 ?clubCity.
  SERVICE wikibase:label { bd:serviceParam wikibase:language "en". }
}
"#;

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N} .\-]").expect("valid search term regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Make a search term safe to interpolate into a SPARQL string literal.
///
/// Keeps letters, digits, spaces, dots and hyphens; collapses whitespace;
/// lowercases.
///
/// ```rust
/// use gaffer::kb::sanitize_search_term;
///
/// assert_eq!(sanitize_search_term("St. Pauli\") }"), "st. pauli");
/// assert_eq!(sanitize_search_term("  Köln  "), "köln");
/// ```
#[must_use]
pub fn sanitize_search_term(term: &str) -> String {
    let kept = UNSAFE_CHARS.replace_all(term, "");
    WHITESPACE.replace_all(kept.trim(), " ").to_lowercase()
}

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<HashMap<String, SparqlValue>>,
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    value: String,
}

type Binding = HashMap<String, SparqlValue>;

fn binding_value<'a>(binding: &'a Binding, key: &str) -> Option<&'a str> {
    binding.get(key).map(|v| v.value.as_str())
}

/// Trailing `Q…` id of an entity URI.
fn qid_from_uri(uri: &str) -> Option<&str> {
    uri.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
}

/// English Wikipedia article URL for a page title.
///
/// ```rust
/// use gaffer::kb::article_url;
///
/// assert_eq!(article_url("FC St. Pauli"), "https://en.wikipedia.org/wiki/FC_St._Pauli");
/// ```
#[must_use]
pub fn article_url(title: &str) -> String {
    format!("{ARTICLE_BASE}{}", title.trim().replace(' ', "_"))
}

/// An article intro and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikipediaIntro {
    /// Article URL built from the sitelink title.
    pub url: String,
    /// Plain-text intro section.
    pub extract: String,
}

/// HTTP client for Wikidata SPARQL and the Wikipedia extracts API.
#[derive(Debug, Clone)]
pub struct WikidataClient {
    agent: ureq::Agent,
    config: WikidataConfig,
}

impl WikidataClient {
    /// Create a client.
    #[must_use]
    pub fn new(config: WikidataConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build();
        log::info!(
            "Initialized WikidataClient with SPARQL endpoint {}",
            config.sparql_endpoint
        );
        Self { agent, config }
    }

    /// Client configuration.
    #[must_use]
    pub fn config(&self) -> &WikidataConfig {
        &self.config
    }

    fn get_string(&self, request: ureq::Request, what: &str) -> Result<String> {
        let response = request.call().map_err(|e| match e {
            ureq::Error::Status(code, _) => {
                Error::collaborator(format!("HTTP {code} from {what}"))
            }
            other => Error::collaborator(format!("Network error calling {what}: {other}")),
        })?;

        response
            .into_string()
            .map_err(|e| Error::collaborator(format!("Failed to read response from {what}: {e}")))
    }

    fn sparql(&self, query: &str) -> Result<Vec<Binding>> {
        let request = self
            .agent
            .get(&self.config.sparql_endpoint)
            .set("Accept", "application/sparql-results+json")
            .query("query", query)
            .query("format", "json");
        let body = self.get_string(request, "SPARQL endpoint")?;
        let parsed: SparqlResponse = serde_json::from_str(&body).map_err(|e| {
            Error::collaborator(format!("Unexpected SPARQL response format: {e}"))
        })?;
        Ok(parsed.results.bindings)
    }

    fn get_json(&self, url: &str, params: &[(&str, &str)], what: &str) -> Result<Value> {
        let mut request = self.agent.get(url);
        for (k, v) in params {
            request = request.query(k, v);
        }
        let body = self.get_string(request, what)?;
        serde_json::from_str(&body)
            .map_err(|e| Error::collaborator(format!("Invalid JSON from {what}: {e}")))
    }

    /// SPARQL query text for a club search.
    #[must_use]
    pub fn search_query(term: &str, limit: usize) -> String {
        let term = sanitize_search_term(term);
        let limit = limit.clamp(1, MAX_SEARCH_LIMIT);
        format!(
            r#"
SELECT ?club ?clubLabel ?clubCityLabel ?manager ?managerLabel WHERE {{
  ?club wdt:P31 wd:Q476028;
        wdt:P118 wd:Q82595.
  ?club (rdfs:label|skos:altLabel) ?alias.
  FILTER(LANG(?alias) = "en").
  FILTER(CONTAINS(LCASE(?alias), "{term}")).
  ?club wdt:P286 ?manager.
  OPTIONAL {{ ?club wdt:P159 ?clubCity. }}
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "en". }}
}}
LIMIT {limit}
"#
        )
    }

    /// Search clubs by name or alias; returns raw SPARQL bindings.
    fn search_club(&self, term: &str) -> Result<Vec<Binding>> {
        log::info!("Searching for club: '{term}'");
        self.sparql(&Self::search_query(term, self.config.search_limit))
    }

    /// English Wikipedia intro for a Wikidata entity.
    ///
    /// Missing sitelinks or extracts yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`Error::Collaborator`] on network or format failures.
    pub fn wikipedia_extract(&self, qid: &str) -> Result<Option<WikipediaIntro>> {
        log::info!("Fetching Wikipedia content for QID: {qid}");
        let entities = self.get_json(
            &self.config.api_endpoint,
            &[
                ("action", "wbgetentities"),
                ("ids", qid),
                ("format", "json"),
                ("props", "sitelinks"),
            ],
            "Wikidata API",
        )?;

        let Some(title) = entities
            .pointer(&format!("/entities/{qid}/sitelinks/enwiki/title"))
            .and_then(Value::as_str)
        else {
            log::warn!("No English Wikipedia sitelink for {qid}");
            return Ok(None);
        };

        let page = self.get_json(
            &self.config.wikipedia_endpoint,
            &[
                ("action", "query"),
                ("format", "json"),
                ("titles", title),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("exsectionformat", "plain"),
            ],
            "Wikipedia API",
        )?;

        let extract = page
            .pointer("/query/pages")
            .and_then(Value::as_object)
            .and_then(|pages| {
                pages
                    .values()
                    .find_map(|p| p.get("extract").and_then(Value::as_str))
            })
            .map(str::to_string);

        match extract {
            Some(extract) => Ok(Some(WikipediaIntro {
                url: article_url(title),
                extract,
            })),
            None => {
                log::warn!("No Wikipedia content found for {qid}");
                Ok(None)
            }
        }
    }

    /// Background text is optional: failures are logged and dropped.
    fn optional_extract(&self, uri: Option<&str>) -> Option<WikipediaIntro> {
        let qid = uri.and_then(qid_from_uri)?;
        match self.wikipedia_extract(qid) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Error getting Wikipedia content for {qid}: {e}");
                None
            }
        }
    }
}

impl KnowledgeBase for WikidataClient {
    fn get_club_info(&self, search_text: &str) -> Result<Option<ClubInfo>> {
        if sanitize_search_term(search_text).is_empty() {
            log::warn!("Search text {search_text:?} is empty after sanitizing");
            return Ok(None);
        }

        let bindings = self.search_club(search_text)?;
        let Some(binding) = bindings.first() else {
            log::warn!("No Bundesliga club found matching '{search_text}'");
            return Ok(None);
        };

        let club_name = binding_value(binding, "clubLabel").unwrap_or("Unknown Club");
        let manager_name = binding_value(binding, "managerLabel").unwrap_or(UNKNOWN_MANAGER);
        log::info!("Found club '{club_name}' with manager '{manager_name}'");

        let mut info = ClubInfo {
            club_name: club_name.to_string(),
            manager_name: Some(manager_name.to_string()),
            city_name: binding_value(binding, "clubCityLabel").map(str::to_string),
            ..ClubInfo::default()
        };

        if self.config.include_wikipedia {
            if let Some(intro) = self.optional_extract(binding_value(binding, "club")) {
                log::info!("Club Wikipedia: {}", intro.url);
                info.club_content = Some(intro.extract);
                info.club_wikipedia_url = Some(intro.url);
            }
            if let Some(intro) = self.optional_extract(binding_value(binding, "manager")) {
                log::info!("Manager Wikipedia: {}", intro.url);
                info.manager_content = Some(intro.extract);
                info.manager_wikipedia_url = Some(intro.url);
            }
        }

        Ok(Some(info))
    }

    fn name(&self) -> &'static str {
        "wikidata"
    }
}

impl GazetteerSource for WikidataClient {
    fn club_records(&self) -> Result<Vec<ClubRecord>> {
        log::info!("Retrieving current Bundesliga clubs from Wikidata");
        let bindings = self.sparql(CLUBS_QUERY)?;
        log::info!("Retrieved {} clubs from Wikidata", bindings.len());

        Ok(bindings
            .iter()
            .filter_map(|b| {
                binding_value(b, "clubLabel").map(|club| ClubRecord {
                    club_name: club.to_string(),
                    city_name: binding_value(b, "clubCityLabel").map(str::to_string),
                })
            })
            .collect())
    }
}
