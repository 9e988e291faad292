//! Core type definitions for catalog titles and comments.
//!
//! [`MediaKind`] serializes with the remote catalog's path segment
//! (`"movie"` / `"tv"`), which is also the segment used in local storage keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, MediaId};

/// Kind of catalog title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    /// A feature film.
    #[serde(rename = "movie")]
    Movie,
    /// A TV series.
    #[serde(rename = "tv", alias = "series")]
    Series,
}

impl MediaKind {
    /// Path segment used by the remote catalog and by storage keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "tv",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Series => "Series",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" | "movies" | "film" => Ok(Self::Movie),
            "tv" | "series" | "show" => Ok(Self::Series),
            other => Err(Error::validation(format!("unknown media kind '{other}'"))),
        }
    }
}

/// Where a comment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentOrigin {
    /// Read-only review fetched from the remote catalog.
    Remote,
    /// Comment written on this device.
    Local,
}

/// Composite key scoping comments to one title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Partition {
    /// Catalog id of the title.
    pub media_id: MediaId,
    /// Kind of the title.
    pub kind: MediaKind,
}

impl Partition {
    /// Create a partition key.
    pub const fn new(media_id: MediaId, kind: MediaKind) -> Self {
        Self { media_id, kind }
    }

    /// Key under which the partition's comments are persisted.
    pub fn storage_key(&self) -> String {
        format!("cinetech_comments_{}_{}", self.kind.as_str(), self.media_id)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.media_id)
    }
}
