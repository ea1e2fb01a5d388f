//! `PinkVisualClient` - Pink Visual API client implementation.

use std::borrow::Cow;

use anyhow::{Context, Result, anyhow, bail};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::instrument;
use url::Url;

use super::api::LocalPinkVisualApi;
use super::error::ApiError;
use super::key::default_key;
use super::namespaces::{Actors, Episodes, Niches};
use super::params::{KEY_PARAM, QueryParams};
use super::types::{Actor, Episode, Listing, Niche, Record};

/// Default base URL for the Pink Visual API.
pub const DEFAULT_BASE_URL: &str = "http://api.pinkvisual.com/get/latest/";

/// Placeholder for the API key in logged URLs.
const REDACTED: &str = "***";

/// Pink Visual API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct PinkVisualClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key set on the builder.
    api_key: Option<String>,
}

/// Builder for `PinkVisualClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct PinkVisualClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl PinkVisualClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key.
    ///
    /// Optional: without it the client uses the process-wide key set by
    /// [`crate::init`].
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - the base URL cannot carry path segments (e.g. `mailto:`).
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<PinkVisualClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };
        if base_url.cannot_be_a_base() {
            bail!("base URL cannot carry a path: {base_url}");
        }

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(PinkVisualClient {
            http_client,
            base_url,
            api_key: self.api_key.filter(|key| !key.is_empty()),
        })
    }
}

impl PinkVisualClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> PinkVisualClientBuilder {
        PinkVisualClientBuilder::new()
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Episode operations.
    #[must_use]
    pub const fn episodes(&self) -> Episodes<'_, Self> {
        Episodes::new(self)
    }

    /// Niche operations.
    #[must_use]
    pub const fn niches(&self) -> Niches<'_, Self> {
        Niches::new(self)
    }

    /// Actor operations.
    #[must_use]
    pub const fn actors(&self) -> Actors<'_, Self> {
        Actors::new(self)
    }

    /// Picks the key for a request: explicit parameter, then builder key,
    /// then the process-wide default.
    fn resolve_key<'a>(&'a self, params: &'a QueryParams) -> Result<Cow<'a, str>> {
        if let Some(key) = params.api_key() {
            return Ok(Cow::Borrowed(key));
        }
        if let Some(ref key) = self.api_key {
            return Ok(Cow::Borrowed(key.as_str()));
        }
        default_key()
            .filter(|key| !key.is_empty())
            .map(Cow::Owned)
            .context(
                "API key is not configured: set one on the builder, call init(), or pass `key`",
            )
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    ///
    /// Empty, `.` and `..` segments are rejected: the URL parser would drop
    /// or collapse them and the request would reach a different endpoint.
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            bail!("path parameter must not be empty, `.` or `..`: {segment:?}");
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Returns the encoded path of `url` below the base URL, for error
    /// contexts and logs.
    fn relative_path(&self, url: &Url) -> String {
        let path = url.path();
        path.strip_prefix(self.base_url.path())
            .unwrap_or(path)
            .trim_start_matches('/')
            .to_owned()
    }

    /// Sends a GET request with the merged query parameters and returns the
    /// parsed JSON body.
    ///
    /// Anything but HTTP 200 fails with an [`ApiError`] carrying the server's
    /// `error` message.
    #[instrument(skip_all)]
    async fn get_json(&self, segments: &[&str], params: &QueryParams) -> Result<Value> {
        let api_key = self.resolve_key(params)?;
        let url = self.endpoint_url(segments)?;
        let path = self.relative_path(&url);

        let request = self
            .http_client
            .get(url)
            .query(&params.to_query(&api_key))
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        log_request(request.url());

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;

        if status != StatusCode::OK {
            let error = ApiError::from_response(status, &body);
            log_api_error(&path, &error);
            return Err(error.into());
        }

        let raw_result: std::result::Result<Value, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }

    /// Fetches a list endpoint and unwraps `body[field]`.
    async fn get_listing(
        &self,
        segments: &[&str],
        field: &str,
        params: &QueryParams,
    ) -> Result<Listing<Record>> {
        let body = self.get_json(segments, params).await?;
        Listing::from_body(body, field)
    }

    /// Fetches a single-record endpoint and unwraps `body[field]` if present.
    async fn get_record(
        &self,
        segments: &[&str],
        field: &str,
        params: &QueryParams,
    ) -> Result<Record> {
        let body = self.get_json(segments, params).await?;
        Record::from_body(body, field)
    }
}

/// Logs an outgoing request with its key masked.
fn log_request(url: &Url) {
    tracing::debug!(url = %redact_key(url), "PinkVisual API request");
}

/// Logs a non-200 response.
fn log_api_error(path: &str, error: &ApiError) {
    tracing::warn!(
        status = error.status,
        error = %error.message,
        "PinkVisual API returned an error: {path}"
    );
}

/// Copies `url` with the `key` query parameter masked.
fn redact_key(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == KEY_PARAM {
                String::from(REDACTED)
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}

impl LocalPinkVisualApi for PinkVisualClient {
    #[instrument(skip_all)]
    async fn episodes_all(&self, params: &QueryParams) -> Result<Listing<Episode>> {
        self.get_listing(&["episodes", "all"], "episodes", params)
            .await
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn episode(&self, id: &str, params: &QueryParams) -> Result<Episode> {
        self.get_record(&["episode", id], "episode", params).await
    }

    #[instrument(skip_all, fields(term = %term))]
    async fn search_episodes(
        &self,
        term: &str,
        params: &QueryParams,
    ) -> Result<Listing<Episode>> {
        self.get_listing(&["episodes", "search", term], "episodes", params)
            .await
    }

    #[instrument(skip_all, fields(niche_id = %niche_id))]
    async fn episodes_by_niche(
        &self,
        niche_id: &str,
        params: &QueryParams,
    ) -> Result<Listing<Episode>> {
        self.get_listing(&["episodes", "niche", niche_id], "episodes", params)
            .await
    }

    #[instrument(skip_all, fields(actor_id = %actor_id))]
    async fn episodes_by_actor(
        &self,
        actor_id: &str,
        params: &QueryParams,
    ) -> Result<Listing<Episode>> {
        self.get_listing(&["episodes", "actor", actor_id], "episodes", params)
            .await
    }

    #[instrument(skip_all)]
    async fn niches_all(&self, params: &QueryParams) -> Result<Listing<Niche>> {
        self.get_listing(&["niches", "all"], "niches", params).await
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn niche(&self, id: &str, params: &QueryParams) -> Result<Niche> {
        self.get_record(&["niche", id], "niche", params).await
    }

    #[instrument(skip_all)]
    async fn actors_all(&self, params: &QueryParams) -> Result<Listing<Actor>> {
        self.get_listing(&["actors", "all"], "actors", params).await
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn actor(&self, id: &str, params: &QueryParams) -> Result<Actor> {
        self.get_record(&["actor", id], "actor", params).await
    }

    #[instrument(skip_all, fields(term = %term))]
    async fn search_actors(&self, term: &str, params: &QueryParams) -> Result<Listing<Actor>> {
        self.get_listing(&["actors", "search", term], "actors", params)
            .await
    }

    #[instrument(skip_all, fields(letter = %letter))]
    async fn actors_by_letter(
        &self,
        letter: char,
        params: &QueryParams,
    ) -> Result<Listing<Actor>> {
        let mut buf = [0u8; 4];
        let letter = letter.encode_utf8(&mut buf);
        self.get_listing(&["actors", "letter", letter], "actors", params)
            .await
    }

    #[instrument(skip_all, fields(niche_id = %niche_id))]
    async fn actors_by_niche(
        &self,
        niche_id: &str,
        params: &QueryParams,
    ) -> Result<Listing<Actor>> {
        self.get_listing(&["actors", "niche", niche_id], "actors", params)
            .await
    }
}
