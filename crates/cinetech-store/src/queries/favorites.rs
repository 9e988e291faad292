//! Favorites queries.

use chrono::{DateTime, Utc};
use cinetech_common::{MediaId, MediaKind, Result};

use super::{read_array, write_array};
use crate::kv::KeyValueStore;
use crate::models::{FavoriteEntry, NewFavorite};

/// Key holding the whole favorites collection.
pub const FAVORITES_KEY: &str = "cinetech_favorites";

/// All favorites in stored (insertion) order.
pub fn list_favorites(kv: &dyn KeyValueStore) -> Result<Vec<FavoriteEntry>> {
    read_array(kv, FAVORITES_KEY)
}

/// Whether a favorite exists for `(id, kind)`.
pub fn is_favorite(kv: &dyn KeyValueStore, id: MediaId, kind: MediaKind) -> Result<bool> {
    Ok(list_favorites(kv)?.iter().any(|f| f.matches(id, kind)))
}

/// Append a favorite stamped with `added_at`.
///
/// # Returns
///
/// * `Ok(true)` - The entry was added
/// * `Ok(false)` - An entry with the same `(id, kind)` already exists; nothing was written
pub fn add_favorite(
    kv: &dyn KeyValueStore,
    favorite: NewFavorite,
    added_at: DateTime<Utc>,
) -> Result<bool> {
    let mut favorites = list_favorites(kv)?;
    if favorites.iter().any(|f| f.matches(favorite.id, favorite.kind)) {
        return Ok(false);
    }

    favorites.push(favorite.into_entry(added_at));
    write_array(kv, FAVORITES_KEY, &favorites)?;
    Ok(true)
}

/// Remove every favorite matching `(id, kind)`.
///
/// Returns the number of entries removed. When nothing matches the stored
/// value is left untouched.
pub fn remove_favorite(kv: &dyn KeyValueStore, id: MediaId, kind: MediaKind) -> Result<usize> {
    let mut favorites = list_favorites(kv)?;
    let before = favorites.len();
    favorites.retain(|f| !f.matches(id, kind));

    let removed = before - favorites.len();
    if removed > 0 {
        write_array(kv, FAVORITES_KEY, &favorites)?;
    }
    Ok(removed)
}

/// Favorites newest first. Entries added at the same instant keep the later
/// insertion first.
pub fn sorted_favorites(kv: &dyn KeyValueStore) -> Result<Vec<FavoriteEntry>> {
    let mut indexed: Vec<(usize, FavoriteEntry)> =
        list_favorites(kv)?.into_iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| b.added_at.cmp(&a.added_at).then(ib.cmp(ia)));
    Ok(indexed.into_iter().map(|(_, f)| f).collect())
}
