use std::sync::OnceLock;

use backend_client::{error_from_response, StoreError, TracedClient};
use regex::Regex;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::page::{SearchHit, SearchPage};

/// Client for the public encyclopedia search API.
#[derive(Clone)]
pub struct WikiClient {
    http: TracedClient,
    endpoint: Url,
}

#[derive(Deserialize)]
struct ApiResponse {
    query: QueryBody,
}

#[derive(Deserialize)]
struct QueryBody {
    search: Vec<RawHit>,
    searchinfo: SearchInfo,
}

#[derive(Deserialize)]
struct RawHit {
    title: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Deserialize)]
struct SearchInfo {
    totalhits: u64,
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid tag regex"))
}

impl WikiClient {
    pub fn new(http: TracedClient, endpoint: &str) -> Result<Self, StoreError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| StoreError::validation(format!("Invalid search endpoint: {e}")))?;
        Ok(Self { http, endpoint })
    }

    /// Full-text search, ten results starting at `offset`. Each page is a
    /// fresh network call; nothing is cached.
    #[instrument(name = "wikisearch.search", skip(self), fields(term = %term, offset))]
    pub async fn search(&self, term: &str, offset: u64) -> Result<SearchPage, StoreError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(StoreError::validation("Search term must not be empty"));
        }

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("list", "search")
            .append_pair("format", "json")
            .append_pair("sroffset", &offset.to_string())
            .append_pair("srsearch", term);

        let req = self.http.request(reqwest::Method::GET, url).build()?;
        let resp = self.http.execute(req).await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        let body: ApiResponse = resp.json().await?;

        let hits = body
            .query
            .search
            .into_iter()
            .map(|raw| SearchHit {
                title: raw.title,
                snippet: tag_re().replace_all(&raw.snippet, "").into_owned(),
            })
            .collect();

        Ok(SearchPage {
            hits,
            total_hits: body.query.searchinfo.totalhits,
            offset,
        })
    }
}
