//! Catalog client for the plant catalog HTTP API.

use std::fmt::Debug;
use std::str::FromStr;

use reqwest::header::{self, HeaderMap};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogClientConfig;
use crate::error::CatalogClientError;
use crate::normalize::normalize;
use crate::types::{Category, Difficulty, PlantRecord, RawPlant};

/// Longest excerpt of an undecodable body included in errors.
const BODY_SNIPPET_LEN: usize = 200;

/// A client for the plant catalog.
///
/// Every operation issues exactly one `GET` request against the configured
/// base URL and returns normalized [`PlantRecord`]s.
/// Nothing is retried; callers decide whether to issue a query again.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    config: CatalogClientConfig,
}

impl Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("catalog_url", &self.config.catalog_url)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogClientError> {
        let base_url = parse_base_url(&config.catalog_url)?;
        let http = build_http_client(&config)?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Get the configured catalog URL.
    pub fn catalog_url(&self) -> &str {
        &self.config.catalog_url
    }

    /// `GET /plants`
    #[instrument(skip_all)]
    pub async fn list_all(&self) -> Result<Vec<PlantRecord>, CatalogClientError> {
        let url = self.endpoint(&["plants"]);
        self.fetch_records(url).await
    }

    /// `GET /plants/{id}`
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<PlantRecord, CatalogClientError> {
        if id.trim().is_empty() {
            return Err(CatalogClientError::InvalidRequest(
                "plant id must not be empty".to_string(),
            ));
        }
        // dot segments would be resolved away, leaving `/plants`
        if matches!(id, "." | "..") {
            return Err(CatalogClientError::InvalidRequest(format!(
                "'{id}' is not a valid plant id"
            )));
        }
        let url = self.endpoint(&["plants", id]);
        let value = self.fetch(url).await?;
        record_from_value(value)
    }

    /// `GET /plants?category={category}`
    #[instrument(skip(self))]
    pub async fn list_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<PlantRecord>, CatalogClientError> {
        if !category.is_known() {
            return Err(CatalogClientError::InvalidRequest(format!(
                "cannot filter by category '{category}'"
            )));
        }
        let mut url = self.endpoint(&["plants"]);
        url.query_pairs_mut()
            .append_pair("category", &category.to_string());
        self.fetch_records(url).await
    }

    /// `GET /plants?difficulty={difficulty}`
    #[instrument(skip(self))]
    pub async fn list_by_difficulty(
        &self,
        difficulty: Difficulty,
    ) -> Result<Vec<PlantRecord>, CatalogClientError> {
        if !difficulty.is_known() {
            return Err(CatalogClientError::InvalidRequest(format!(
                "cannot filter by difficulty '{difficulty}'"
            )));
        }
        let mut url = self.endpoint(&["plants"]);
        url.query_pairs_mut()
            .append_pair("difficulty", &difficulty.to_string());
        self.fetch_records(url).await
    }

    /// `GET /plants/search?q={query}`
    ///
    /// The query is sent as is,
    /// mapping blank queries to [`Self::list_all`] is up to the caller.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<PlantRecord>, CatalogClientError> {
        let mut url = self.endpoint(&["plants", "search"]);
        url.query_pairs_mut().append_pair("q", query);
        self.fetch_records(url).await
    }

    /// `GET /plants/seasonal?month={month}&location={location}`
    ///
    /// `month` is 1 based, i.e. 1 is January.
    #[instrument(skip(self))]
    pub async fn list_seasonal(
        &self,
        month: u8,
        location: &str,
    ) -> Result<Vec<PlantRecord>, CatalogClientError> {
        if !(1..=12).contains(&month) {
            return Err(CatalogClientError::InvalidRequest(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        let mut url = self.endpoint(&["plants", "seasonal"]);
        url.query_pairs_mut()
            .append_pair("month", &month.to_string())
            .append_pair("location", location);
        self.fetch_records(url).await
    }

    /// Append path segments to the base URL, percent-encoding each of them.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `parse_base_url` only accepts URLs that can carry a path
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch_records(&self, url: Url) -> Result<Vec<PlantRecord>, CatalogClientError> {
        let value = self.fetch(url).await?;
        let records = records_from_value(value)?;
        debug!(n_records = records.len(), "received plant records");
        Ok(records)
    }

    /// Send a `GET` request and decode the body as JSON.
    ///
    /// The body is read as text first so that empty and malformed
    /// responses can be told apart in the error.
    async fn fetch(&self, url: Url) -> Result<Value, CatalogClientError> {
        debug!(%url, "sending catalog request");

        let connection_error = |source: reqwest::Error| CatalogClientError::Connection {
            url: url.to_string(),
            source,
        };

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(connection_error)?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "catalog request failed");
            return Err(CatalogClientError::Transport { status });
        }

        let body = response.text().await.map_err(connection_error)?;
        debug!(%status, body_len = body.len(), "received catalog response");

        parse_body(&body)
    }
}

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

fn parse_body(body: &str) -> Result<Value, CatalogClientError> {
    if body.trim().is_empty() {
        return Err(CatalogClientError::decode("empty response from catalog"));
    }

    serde_json::from_str(body).map_err(|err| {
        CatalogClientError::decode(format!(
            "{err}, response started with '{}'",
            snippet(body)
        ))
    })
}

fn records_from_value(value: Value) -> Result<Vec<PlantRecord>, CatalogClientError> {
    let Value::Array(items) = value else {
        return Err(CatalogClientError::decode(format!(
            "expected a list of plants, found {}",
            describe(&value)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            RawPlant::try_from(item)
                .map(|raw| normalize(&raw))
                .map_err(|other| {
                    CatalogClientError::decode(format!(
                        "expected a plant object at position {index}, found {}",
                        describe(&other)
                    ))
                })
        })
        .collect()
}

fn record_from_value(value: Value) -> Result<PlantRecord, CatalogClientError> {
    RawPlant::try_from(value)
        .map(|raw| normalize(&raw))
        .map_err(|other| {
            CatalogClientError::decode(format!(
                "expected a plant object, found {}",
                describe(&other)
            ))
        })
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// The first [`BODY_SNIPPET_LEN`] characters of a body.
fn snippet(body: &str) -> String {
    let mut chars = body.chars();
    let snippet: String = chars.by_ref().take(BODY_SNIPPET_LEN).collect();
    if chars.next().is_some() {
        format!("{snippet}...")
    } else {
        snippet
    }
}

// ---------------------------------------------------------------------------
// HTTP client builder
// ---------------------------------------------------------------------------

fn parse_base_url(catalog_url: &str) -> Result<Url, CatalogClientError> {
    let url = Url::parse(catalog_url).map_err(|e| {
        CatalogClientError::Config(format!("invalid catalog url '{catalog_url}': {e}"))
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(CatalogClientError::Config(format!(
            "catalog url '{catalog_url}' must be an http(s) url"
        )));
    }

    Ok(url)
}

/// Build the HTTP client with configured headers and timeouts.
fn build_http_client(config: &CatalogClientConfig) -> Result<reqwest::Client, CatalogClientError> {
    let mut headers = HeaderMap::new();

    for (key, value) in &config.extra_headers {
        headers.insert(
            header::HeaderName::from_str(key).map_err(
                |e: reqwest::header::InvalidHeaderName| CatalogClientError::Config(e.to_string()),
            )?,
            header::HeaderValue::from_str(value).map_err(
                |e: reqwest::header::InvalidHeaderValue| CatalogClientError::Config(e.to_string()),
            )?,
        );
    }

    debug!(
        catalog_url = %config.catalog_url,
        extra_headers = config.extra_headers.len(),
        connect_timeout = ?config.connect_timeout,
        request_timeout = ?config.request_timeout,
        "building catalog HTTP client"
    );

    let mut client_builder = reqwest::Client::builder().default_headers(headers);

    if let Some(timeout) = config.connect_timeout {
        client_builder = client_builder.connect_timeout(timeout);
    }
    if let Some(timeout) = config.request_timeout {
        client_builder = client_builder.timeout(timeout);
    }
    if let Some(ref user_agent) = config.user_agent {
        client_builder = client_builder.user_agent(user_agent);
    }

    client_builder
        .build()
        .map_err(|e| CatalogClientError::Config(e.to_string()))
}
