//! TMDB (The Movie Database) catalog backend.
//!
//! Implements [`CatalogProvider`] by querying the TMDB v3 REST API.
//!
//! Features:
//! - Token-bucket rate limiting via [`governor`].
//! - API key and response language attached to every request.
//! - Typed errors: transport failures, non-success statuses and malformed
//!   bodies are reported separately. Nothing is retried.

use std::num::NonZeroU32;

use async_trait::async_trait;
use cinetech_common::{Error, MediaId, MediaKind, Result};
use governor::{Quota, RateLimiter};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::endpoint::{Endpoint, Listing};
use super::provider::CatalogProvider;
use super::types::{Genre, GenreList, Keyword, MultiResult, Page, TitleDetails, TitleSummary};
use crate::config::CatalogConfig;

/// Sub-resources embedded in a details response.
const DETAILS_APPEND: &str = "credits,reviews,similar";

/// TMDB catalog backend.
///
/// # Examples
///
/// ```no_run
/// use cinetech::catalog::TmdbCatalog;
/// use cinetech::config::CatalogConfig;
///
/// let config = CatalogConfig {
///     api_key: "your-api-key".into(),
///     ..CatalogConfig::default()
/// };
/// let catalog = TmdbCatalog::new(&config).unwrap();
/// ```
pub struct TmdbCatalog {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
    rate_limiter: governor::RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl TmdbCatalog {
    /// Create a backend from the catalog configuration.
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {e}")))?;

        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            rate_limiter,
        })
    }

    /// Issue one GET against `endpoint` and decode the body.
    ///
    /// The API key and language are always sent; `params` are appended.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, endpoint.path());
        debug!(%endpoint, params = ?params, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&[("api_key", &self.api_key), ("language", &self.language)])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                warn!(%endpoint, error = %e, "TMDB request failed");
                Error::transport(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%endpoint, status = status.as_u16(), "TMDB returned error status");
            return Err(Error::remote(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        serde_json::from_str(&body)
            .map_err(|e| Error::decode(format!("failed to parse TMDB response for {endpoint}: {e}")))
    }
}

#[async_trait]
impl CatalogProvider for TmdbCatalog {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    async fn list(&self, listing: Listing, page: u32) -> Result<Page<TitleSummary>> {
        let params = if listing.is_paginated() {
            vec![("page", page.max(1).to_string())]
        } else {
            Vec::new()
        };

        let body: Page<TitleSummary> = self.fetch(Endpoint::Listing(listing), &params).await?;
        Ok(body.map(|t| t.with_kind(listing.kind())))
    }

    async fn search_multi(&self, query: &str) -> Result<Page<MultiResult>> {
        self.fetch(Endpoint::SearchMulti, &[("query", query.to_string())])
            .await
    }

    async fn search_titles(&self, kind: MediaKind, query: &str) -> Result<Page<TitleSummary>> {
        let body: Page<TitleSummary> = self
            .fetch(Endpoint::SearchTitles(kind), &[("query", query.to_string())])
            .await?;
        Ok(body.map(|t| t.with_kind(kind)))
    }

    async fn search_keywords(&self, query: &str) -> Result<Page<Keyword>> {
        self.fetch(Endpoint::SearchKeyword, &[("query", query.to_string())])
            .await
    }

    async fn details(&self, kind: MediaKind, id: MediaId) -> Result<TitleDetails> {
        let details: TitleDetails = self
            .fetch(
                Endpoint::Details(kind, id),
                &[("append_to_response", DETAILS_APPEND.to_string())],
            )
            .await?;
        Ok(details.with_kind(kind))
    }

    async fn similar(&self, kind: MediaKind, id: MediaId) -> Result<Page<TitleSummary>> {
        let body: Page<TitleSummary> = self.fetch(Endpoint::Similar(kind, id), &[]).await?;
        Ok(body.map(|t| t.with_kind(kind)))
    }

    async fn genres(&self, kind: MediaKind) -> Result<Vec<Genre>> {
        let body: GenreList = self.fetch(Endpoint::GenreList(kind), &[]).await?;
        Ok(body.genres)
    }
}
