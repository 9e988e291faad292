//! Cinetech-Store: Local favorites and comment threads.
//!
//! The store persists two kinds of records through a synchronous key-value
//! substrate: one key holds the whole favorites collection and one key per
//! `(kind, media id)` partition holds that title's local comments. Values are
//! JSON arrays.
//!
//! # Modules
//!
//! - `kv` - The key-value substrate trait and its SQLite / in-memory backends
//! - `migrations` - Schema for the SQLite backend
//! - `pool` - Connection pool management
//! - `models` - Favorite and comment records
//! - `queries` - Read-modify-write operations over the substrate
//! - `store` - [`LocalStore`], the composed entry point
//!
//! # Example
//!
//! ```
//! use cinetech_common::{MediaId, MediaKind, Partition};
//! use cinetech_store::{kv::MemoryKv, LocalStore};
//!
//! let store = LocalStore::new(MemoryKv::new());
//! let partition = Partition::new(MediaId::new(550), MediaKind::Movie);
//! let comment = store.add_comment(&partition, "Great film", None).unwrap();
//! assert!(comment.id.is_local());
//! ```

pub mod kv;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
pub mod store;

pub use models::{CommentEntry, FavoriteEntry, NewFavorite};
pub use store::{CommentIdSource, DescendingIds, LocalStore};
