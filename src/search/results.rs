//! Full results view for a submitted query.

use cinetech_common::{Error, MediaKind, Result};
use tracing::warn;

use crate::catalog::{CatalogProvider, TitleSummary};

/// Search movies and series concurrently and merge them by popularity.
///
/// Results are ordered most popular first; a missing popularity counts as zero
/// and ties keep movies ahead of series. One failing half is logged and
/// skipped; the call fails only when both do.
pub async fn search_all(provider: &dyn CatalogProvider, query: &str) -> Result<Vec<TitleSummary>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::validation("search query is empty"));
    }

    let (movies, series) = tokio::join!(
        provider.search_titles(MediaKind::Movie, query),
        provider.search_titles(MediaKind::Series, query)
    );

    let (movies, series) = match (movies, series) {
        (Err(e), Err(_)) => return Err(e),
        (movies, series) => (movies, series),
    };

    let mut results = Vec::new();
    for (kind, half) in [(MediaKind::Movie, movies), (MediaKind::Series, series)] {
        match half {
            Ok(page) => results.extend(page.results.into_iter().map(|t| t.with_kind(kind))),
            Err(e) => warn!(query, %kind, error = %e, "Search failed for one kind"),
        }
    }
    results.sort_by(|a, b| popularity(b).total_cmp(&popularity(a)));
    Ok(results)
}

fn popularity(title: &TitleSummary) -> f64 {
    title.popularity.unwrap_or(0.0)
}
