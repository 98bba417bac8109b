//! Rotten Tomatoes API client.
//!
//! Every outbound call holds one slot from a fixed 3-permit pool for its
//! full duration, so at most three requests are in flight against the
//! service at any moment, process-wide. Waiting for a slot and the round
//! trip itself both honor the caller's cancellation token; the slot is
//! released on every exit path, including decode failures.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::types::{MovieResult, ReviewList, SearchResults};
use crate::error::{Error, Result};

/// Production endpoint of the v1.0 API.
pub const DEFAULT_BASE_URL: &str = "http://api.rottentomatoes.com/api/public/v1.0";

/// Outbound requests allowed in flight at once.
const REQUEST_SLOTS: usize = 3;

/// Results per search page, fixed by the endpoint contract.
const SEARCH_PAGE_LIMIT: &str = "20";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Read-only view of the Rotten Tomatoes catalog.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one page of the title search endpoint. Pages start at 1.
    async fn search_movies(
        &self,
        title: &str,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<SearchResults>;

    /// Resolve an IMDb id to a catalog record. `None` when the service has
    /// no record for the id.
    async fn lookup_by_imdb_id(
        &self,
        imdb_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<MovieResult>>;

    /// Top-critic reviews for a catalog id, in service order.
    async fn movie_reviews(
        &self,
        movie_id: &str,
        cancel: &CancellationToken,
    ) -> Result<ReviewList>;
}

/// HTTP client for the v1.0 API with a shared request-slot pool.
pub struct RottenTomatoesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    slots: Arc<Semaphore>,
}

impl RottenTomatoesClient {
    /// Create a client against the production endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom endpoint (tests, proxies).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                reqwest::Client::new()
            });

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            slots: Arc::new(Semaphore::new(REQUEST_SLOTS)),
        }
    }

    /// GET `path`, holding one request slot for the duration of the call.
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        what: &'static str,
        cancel: &CancellationToken,
    ) -> Result<T> {
        // Permits queue in FIFO order; the wait must stay interruptible, and
        // an already-cancelled token must win over an available permit.
        let _slot = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            permit = self.slots.acquire() => permit.expect("request pool closed"),
        };

        let url = format!("{}{}", self.base_url, path);
        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("apikey", self.api_key.as_str()));

        debug!(url = %url, what, "catalog request");

        let round_trip = async {
            let resp = self.http.get(&url).query(&query).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(Error::Status {
                    status,
                    url: url.clone(),
                });
            }
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|source| Error::Decode { what, source })
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            result = round_trip => result,
        }
        // _slot drops here on every path, releasing the permit.
    }
}

#[async_trait::async_trait]
impl CatalogClient for RottenTomatoesClient {
    async fn search_movies(
        &self,
        title: &str,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<SearchResults> {
        let page = page.to_string();
        self.get(
            "/movies.json",
            &[
                ("q", title),
                ("page_limit", SEARCH_PAGE_LIMIT),
                ("page", page.as_str()),
            ],
            "search results",
            cancel,
        )
        .await
    }

    async fn lookup_by_imdb_id(
        &self,
        imdb_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<MovieResult>> {
        // The alias endpoint wants the bare numeric id, without the leading
        // "tt" prefix.
        let id = imdb_id.trim_start_matches('t');
        let result: MovieResult = self
            .get(
                "/movie_alias.json",
                &[("id", id), ("type", "imdb")],
                "alias lookup",
                cancel,
            )
            .await?;

        if result.id.is_empty() {
            Ok(None)
        } else {
            Ok(Some(result))
        }
    }

    async fn movie_reviews(
        &self,
        movie_id: &str,
        cancel: &CancellationToken,
    ) -> Result<ReviewList> {
        self.get(
            &format!("/movies/{movie_id}/reviews.json"),
            &[
                ("review_type", "top_critic"),
                ("page_limit", "10"),
                ("page", "1"),
                ("country", "us"),
            ],
            "review list",
            cancel,
        )
        .await
    }
}
