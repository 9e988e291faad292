//! The composed local store: favorites plus per-title comment threads.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use cinetech_common::{CommentId, CommentOrigin, Error, MediaId, MediaKind, Partition, Result};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::kv::KeyValueStore;
use crate::models::{CommentEntry, FavoriteEntry, NewFavorite};
use crate::queries::{comments, favorites};

/// Default author recorded on locally written comments.
pub const DEFAULT_AUTHOR: &str = "Utilisateur";

/// Issues ids for locally written comments.
///
/// Implementations must never return an id already present in `existing`
/// and must stay clear of the positive id space used by remote reviews.
pub trait CommentIdSource: Send + Sync {
    fn next_id(&self, partition: &Partition, existing: &[CommentEntry]) -> CommentId;
}

/// Strictly decreasing negative ids, per partition.
///
/// The next id is one below both the lowest stored id and the last id this
/// source issued for the partition, so ids are not reused within a process
/// even after deletions.
#[derive(Debug, Default)]
pub struct DescendingIds {
    last_issued: Mutex<HashMap<Partition, i64>>,
}

impl DescendingIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommentIdSource for DescendingIds {
    fn next_id(&self, partition: &Partition, existing: &[CommentEntry]) -> CommentId {
        let mut last_issued = self.last_issued.lock();
        let floor = existing
            .iter()
            .map(|c| c.id.get())
            .chain(last_issued.get(partition).copied())
            .filter(|id| *id < 0)
            .min()
            .unwrap_or(0);

        let id = floor - 1;
        last_issued.insert(*partition, id);
        CommentId::new(id)
    }
}

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Favorites and local comments over a key-value substrate.
///
/// Cheap to clone; clones share the substrate, id source and clock.
#[derive(Clone)]
pub struct LocalStore {
    kv: Arc<dyn KeyValueStore>,
    ids: Arc<dyn CommentIdSource>,
    clock: Clock,
    author: String,
}

impl fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalStore")
            .field("author", &self.author)
            .finish_non_exhaustive()
    }
}

impl LocalStore {
    /// Create a store with descending comment ids and the wall clock.
    pub fn new(kv: impl KeyValueStore + 'static) -> Self {
        Self {
            kv: Arc::new(kv),
            ids: Arc::new(DescendingIds::new()),
            clock: Arc::new(Utc::now),
            author: DEFAULT_AUTHOR.to_string(),
        }
    }

    /// Replace the comment id source.
    pub fn with_id_source(mut self, ids: impl CommentIdSource + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// Replace the clock used for `added_at` / `created_at`.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Set the author recorded on new comments.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    // -----------------------------------------------------------------------
    // Favorites
    // -----------------------------------------------------------------------

    /// All favorites, in stored order.
    pub fn list_favorites(&self) -> Result<Vec<FavoriteEntry>> {
        favorites::list_favorites(self.kv.as_ref())
    }

    /// Favorites newest first, for display.
    pub fn sorted_favorites(&self) -> Result<Vec<FavoriteEntry>> {
        favorites::sorted_favorites(self.kv.as_ref())
    }

    pub fn is_favorite(&self, id: MediaId, kind: MediaKind) -> Result<bool> {
        favorites::is_favorite(self.kv.as_ref(), id, kind)
    }

    /// Add a favorite. Returns `false` without writing when `(id, kind)` is
    /// already a favorite.
    pub fn add_favorite(&self, favorite: NewFavorite) -> Result<bool> {
        let (id, kind) = (favorite.id, favorite.kind);
        let added = favorites::add_favorite(self.kv.as_ref(), favorite, (self.clock)())?;
        if added {
            info!(media_id = %id, %kind, "Added favorite");
        } else {
            debug!(media_id = %id, %kind, "Favorite already present");
        }
        Ok(added)
    }

    /// Remove the favorite for `(id, kind)`; a no-op when there is none.
    pub fn remove_favorite(&self, id: MediaId, kind: MediaKind) -> Result<()> {
        let removed = favorites::remove_favorite(self.kv.as_ref(), id, kind)?;
        if removed > 0 {
            info!(media_id = %id, %kind, removed, "Removed favorite");
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Comments
    // -----------------------------------------------------------------------

    /// Local comments of one title.
    pub fn list_comments(&self, partition: &Partition) -> Result<Vec<CommentEntry>> {
        comments::list_comments(self.kv.as_ref(), partition)
    }

    /// Write a new local comment, or a reply when `parent_id` is set.
    ///
    /// Fails with [`Error::Validation`] when `content` is blank, leaving the
    /// store unchanged.
    pub fn add_comment(
        &self,
        partition: &Partition,
        content: &str,
        parent_id: Option<CommentId>,
    ) -> Result<CommentEntry> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::validation("comment content is empty"));
        }

        let existing = self.list_comments(partition)?;
        let comment = CommentEntry {
            id: self.ids.next_id(partition, &existing),
            author: self.author.clone(),
            content: content.to_string(),
            created_at: (self.clock)(),
            parent_id,
            origin: CommentOrigin::Local,
        };

        let comment = comments::insert_comment(self.kv.as_ref(), partition, comment)?;
        info!(%partition, comment_id = %comment.id, parent_id = ?parent_id, "Added comment");
        Ok(comment)
    }

    /// Delete a local comment together with its replies.
    ///
    /// Returns the ids that were removed, empty when `comment_id` is unknown.
    pub fn delete_comment(&self, partition: &Partition, comment_id: CommentId) -> Result<Vec<CommentId>> {
        let before = self.list_comments(partition)?;
        let removed = comments::delete_comment(self.kv.as_ref(), partition, comment_id)?;
        if removed == 0 {
            return Ok(Vec::new());
        }

        let after = self.list_comments(partition)?;
        let gone: Vec<CommentId> = before
            .into_iter()
            .map(|c| c.id)
            .filter(|id| !after.iter().any(|c| c.id == *id))
            .collect();
        info!(%partition, %comment_id, removed, "Deleted comment");
        Ok(gone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{MemoryKv, SqliteKv};
    use crate::pool::init_memory_pool;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn store() -> LocalStore {
        LocalStore::new(MemoryKv::new()).with_clock(fixed_clock)
    }

    fn fight_club() -> NewFavorite {
        NewFavorite {
            id: MediaId::new(550),
            kind: MediaKind::Movie,
            title: "Fight Club".into(),
            poster_path: Some("/fc.jpg".into()),
            rating: Some(8.4),
            release_date: Some("1999-10-15".into()),
        }
    }

    fn movie(id: u64) -> Partition {
        Partition::new(MediaId::new(id), MediaKind::Movie)
    }

    #[test]
    fn add_favorite_is_idempotent() {
        let store = store();

        assert!(store.add_favorite(fight_club()).unwrap());
        assert!(!store.add_favorite(fight_club()).unwrap());
        assert_eq!(store.list_favorites().unwrap().len(), 1);
        assert!(store.is_favorite(MediaId::new(550), MediaKind::Movie).unwrap());
    }

    #[test]
    fn favorite_identity_includes_kind() {
        let store = store();
        store.add_favorite(fight_club()).unwrap();

        let mut series = fight_club();
        series.kind = MediaKind::Series;
        assert!(store.add_favorite(series).unwrap());
        assert_eq!(store.list_favorites().unwrap().len(), 2);
        assert!(store.is_favorite(MediaId::new(550), MediaKind::Series).unwrap());
    }

    #[test]
    fn remove_missing_favorite_is_a_noop() {
        let store = store();
        store.add_favorite(fight_club()).unwrap();
        let before = store.list_favorites().unwrap();

        store.remove_favorite(MediaId::new(13), MediaKind::Movie).unwrap();
        assert_eq!(store.list_favorites().unwrap(), before);
    }

    #[test]
    fn readding_favorite_resets_added_at() {
        let times = Mutex::new(vec![
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ]);
        let store = LocalStore::new(MemoryKv::new())
            .with_clock(move || times.lock().pop().unwrap_or_else(fixed_clock));

        store.add_favorite(fight_club()).unwrap();
        store.remove_favorite(MediaId::new(550), MediaKind::Movie).unwrap();
        store.add_favorite(fight_club()).unwrap();

        let favorites = store.list_favorites().unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(
            favorites[0].added_at,
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn sorted_favorites_newest_first_ties_by_later_insertion() {
        let store = store();
        for (id, title) in [(1, "A"), (2, "B"), (3, "C")] {
            store
                .add_favorite(NewFavorite {
                    id: MediaId::new(id),
                    title: title.into(),
                    ..fight_club()
                })
                .unwrap();
        }

        let titles: Vec<String> = store
            .sorted_favorites()
            .unwrap()
            .into_iter()
            .map(|f| f.title)
            .collect();
        assert_eq!(titles, vec!["C", "B", "A"]);
    }

    #[test]
    fn comments_are_partitioned() {
        let store = store();
        store.add_comment(&movie(5), "on the movie", None).unwrap();

        assert_eq!(store.list_comments(&movie(5)).unwrap().len(), 1);
        assert!(store
            .list_comments(&Partition::new(MediaId::new(5), MediaKind::Series))
            .unwrap()
            .is_empty());
        assert!(store.list_comments(&movie(6)).unwrap().is_empty());
    }

    #[test]
    fn blank_comment_is_rejected() {
        let kv = Arc::new(MemoryKv::new());
        let store = LocalStore::new(Arc::clone(&kv));

        let err = store.add_comment(&movie(5), "   ", None).unwrap_err();
        assert_matches!(err, Error::Validation(_));
        assert!(kv.is_empty());
    }

    #[test]
    fn comment_content_is_trimmed_and_stamped() {
        let store = store().with_author("Alice");
        let comment = store.add_comment(&movie(5), "  nice  ", None).unwrap();

        assert_eq!(comment.content, "nice");
        assert_eq!(comment.author, "Alice");
        assert_eq!(comment.created_at, fixed_clock());
        assert_eq!(comment.origin, CommentOrigin::Local);
    }

    #[test]
    fn local_ids_are_negative_and_unique() {
        let store = store();
        let a = store.add_comment(&movie(5), "a", None).unwrap();
        let b = store.add_comment(&movie(5), "b", None).unwrap();
        let c = store.add_comment(&movie(5), "c", Some(a.id)).unwrap();

        assert_eq!(a.id, CommentId::new(-1));
        assert_eq!(b.id, CommentId::new(-2));
        assert_eq!(c.id, CommentId::new(-3));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = store();
        store.add_comment(&movie(5), "a", None).unwrap();
        let b = store.add_comment(&movie(5), "b", None).unwrap();
        store.delete_comment(&movie(5), b.id).unwrap();

        let c = store.add_comment(&movie(5), "c", None).unwrap();
        assert_eq!(c.id, CommentId::new(-3));
    }

    #[test]
    fn reply_to_reply_is_rejected() {
        let store = store();
        let top = store.add_comment(&movie(5), "top", None).unwrap();
        let reply = store.add_comment(&movie(5), "reply", Some(top.id)).unwrap();

        let err = store
            .add_comment(&movie(5), "nested", Some(reply.id))
            .unwrap_err();
        assert_matches!(err, Error::Validation(_));
        assert_eq!(store.list_comments(&movie(5)).unwrap().len(), 2);
    }

    #[test]
    fn reply_to_missing_local_parent_is_rejected() {
        let store = store();

        let err = store
            .add_comment(&movie(5), "orphan", Some(CommentId::new(-99)))
            .unwrap_err();
        assert_matches!(err, Error::Validation(_));

        let top = store.add_comment(&movie(5), "top", None).unwrap();
        store.delete_comment(&movie(5), top.id).unwrap();
        let err = store
            .add_comment(&movie(5), "late reply", Some(top.id))
            .unwrap_err();
        assert_matches!(err, Error::Validation(_));

        assert!(store.list_comments(&movie(5)).unwrap().is_empty());
    }

    #[test]
    fn reply_to_remote_parent_is_accepted() {
        let store = store();
        let reply = store
            .add_comment(&movie(5), "agreed", Some(CommentId::new(42)))
            .unwrap();
        assert_eq!(reply.parent_id, Some(CommentId::new(42)));
    }

    #[test]
    fn delete_cascades_to_replies() {
        let store = store();
        let top = store.add_comment(&movie(5), "top", None).unwrap();
        let other = store.add_comment(&movie(5), "other", None).unwrap();
        let r1 = store.add_comment(&movie(5), "r1", Some(top.id)).unwrap();
        let r2 = store.add_comment(&movie(5), "r2", Some(top.id)).unwrap();

        let mut removed = store.delete_comment(&movie(5), top.id).unwrap();
        removed.sort();
        let mut expected = vec![top.id, r1.id, r2.id];
        expected.sort();
        assert_eq!(removed, expected);

        let remaining = store.list_comments(&movie(5)).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, other.id);
    }

    #[test]
    fn delete_unknown_comment_is_a_noop() {
        let store = store();
        store.add_comment(&movie(5), "keep", None).unwrap();

        let removed = store.delete_comment(&movie(5), CommentId::new(-99)).unwrap();
        assert!(removed.is_empty());
        assert_eq!(store.list_comments(&movie(5)).unwrap().len(), 1);
    }

    #[test]
    fn sqlite_backend_round_trips() {
        let store = LocalStore::new(SqliteKv::new(init_memory_pool().unwrap()));

        store.add_favorite(fight_club()).unwrap();
        store.add_comment(&movie(550), "classic", None).unwrap();

        assert!(store.is_favorite(MediaId::new(550), MediaKind::Movie).unwrap());
        assert_eq!(store.list_comments(&movie(550)).unwrap()[0].content, "classic");
    }

    #[test]
    fn corrupt_partition_surfaces_decode_error() {
        let kv = Arc::new(MemoryKv::new());
        kv.set(&movie(5).storage_key(), "{not json").unwrap();
        let store = LocalStore::new(Arc::clone(&kv));

        assert_matches!(store.list_comments(&movie(5)), Err(Error::Decode(_)));
    }
}
