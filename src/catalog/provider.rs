//! Trait definition for remote catalog backends.

use async_trait::async_trait;
use cinetech_common::{MediaId, MediaKind, Result};

use super::endpoint::Listing;
use super::types::{Genre, Keyword, MultiResult, Page, TitleDetails, TitleSummary};

/// Async trait that every catalog backend implements.
///
/// Backends are stateless pass-throughs: every call is one request, failures
/// are returned unchanged ([`Error::Transport`](cinetech_common::Error::Transport)
/// or [`Error::Remote`](cinetech_common::Error::Remote)) and nothing is
/// retried. Callers decide how to degrade.
///
/// Providers are shared behind an `Arc` across tasks.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Short, lowercase identifier for this provider (e.g. `"tmdb"`).
    fn name(&self) -> &'static str;

    /// One page of a title listing.
    async fn list(&self, listing: Listing, page: u32) -> Result<Page<TitleSummary>>;

    /// Search movies, series and people at once.
    async fn search_multi(&self, query: &str) -> Result<Page<MultiResult>>;

    /// Search titles of a single kind.
    async fn search_titles(&self, kind: MediaKind, query: &str) -> Result<Page<TitleSummary>>;

    /// Keyword suggestions for `query`.
    async fn search_keywords(&self, query: &str) -> Result<Page<Keyword>>;

    /// Full details of a title, with credits, reviews and similar titles.
    async fn details(&self, kind: MediaKind, id: MediaId) -> Result<TitleDetails>;

    /// Titles similar to the given one.
    async fn similar(&self, kind: MediaKind, id: MediaId) -> Result<Page<TitleSummary>>;

    /// All genres of a kind.
    async fn genres(&self, kind: MediaKind) -> Result<Vec<Genre>>;
}
