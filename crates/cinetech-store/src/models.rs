//! Records persisted by the local store.

use chrono::{DateTime, Utc};
use cinetech_common::{CommentId, CommentOrigin, MediaId, MediaKind};
use serde::{Deserialize, Serialize};

/// A title the user marked as favorite.
///
/// At most one entry exists per `(id, kind)`. Entries are never edited in
/// place; removing and re-adding one resets `added_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub id: MediaId,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub title: String,
    pub poster_path: Option<String>,
    pub rating: Option<f64>,
    pub release_date: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl FavoriteEntry {
    /// Whether this entry is the favorite for `(id, kind)`.
    pub fn matches(&self, id: MediaId, kind: MediaKind) -> bool {
        self.id == id && self.kind == kind
    }
}

/// Input for [`crate::LocalStore::add_favorite`]; the store stamps `added_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFavorite {
    pub id: MediaId,
    pub kind: MediaKind,
    pub title: String,
    pub poster_path: Option<String>,
    pub rating: Option<f64>,
    pub release_date: Option<String>,
}

impl NewFavorite {
    pub(crate) fn into_entry(self, added_at: DateTime<Utc>) -> FavoriteEntry {
        FavoriteEntry {
            id: self.id,
            kind: self.kind,
            title: self.title,
            poster_path: self.poster_path,
            rating: self.rating,
            release_date: self.release_date,
            added_at,
        }
    }
}

/// A comment on one title, either fetched from the catalog or written locally.
///
/// `parent_id == None` marks a top-level comment. Replies point at a
/// top-level comment of the same partition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentEntry {
    pub id: CommentId,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub parent_id: Option<CommentId>,
    #[serde(default = "local_origin")]
    pub origin: CommentOrigin,
}

fn local_origin() -> CommentOrigin {
    CommentOrigin::Local
}

impl CommentEntry {
    /// Whether this comment has no parent.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether this comment was written on this device.
    pub fn is_local(&self) -> bool {
        self.origin == CommentOrigin::Local
    }
}
