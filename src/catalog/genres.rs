//! Genre-id lookup with a lazily populated, per-directory cache.

use std::sync::Arc;

use cinetech_common::MediaKind;
use tokio::sync::OnceCell;
use tracing::warn;

use super::provider::CatalogProvider;
use super::types::Genre;

/// Resolves listing `genre_ids` to names.
///
/// Each kind's genre list is fetched at most once per directory. A failed
/// fetch is cached as an empty list so listings still render, just without
/// genre names.
pub struct GenreDirectory {
    provider: Arc<dyn CatalogProvider>,
    movie: OnceCell<Vec<Genre>>,
    series: OnceCell<Vec<Genre>>,
}

impl GenreDirectory {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            provider,
            movie: OnceCell::new(),
            series: OnceCell::new(),
        }
    }

    /// The genre list for `kind`, fetching it on first use.
    pub async fn genres(&self, kind: MediaKind) -> &[Genre] {
        let cell = match kind {
            MediaKind::Movie => &self.movie,
            MediaKind::Series => &self.series,
        };

        cell.get_or_init(|| async {
            match self.provider.genres(kind).await {
                Ok(genres) => genres,
                Err(e) => {
                    warn!(%kind, error = %e, "Failed to load genre list");
                    Vec::new()
                }
            }
        })
        .await
    }

    /// Names for `ids`, in order, skipping ids the catalog does not know.
    pub async fn names(&self, kind: MediaKind, ids: &[u32]) -> Vec<String> {
        let genres = self.genres(kind).await;
        ids.iter()
            .filter_map(|id| genres.iter().find(|g| g.id == *id))
            .map(|g| g.name.clone())
            .collect()
    }
}
