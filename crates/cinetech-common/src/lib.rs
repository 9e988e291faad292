//! Cinetech-Common: Shared types, identifiers, and errors.
//!
//! This crate provides common functionality used across cinetech:
//!
//! - **Typed IDs**: Newtype wrappers for media and comment identifiers
//! - **Core Types**: Media kinds, comment origins, and the comment partition key
//! - **Error Handling**: The error taxonomy shared by the client, store, and views
//!
//! # Examples
//!
//! ```
//! use cinetech_common::{Error, MediaId, MediaKind, Partition, Result};
//!
//! let partition = Partition::new(MediaId::new(550), MediaKind::Movie);
//! assert_eq!(partition.storage_key(), "cinetech_comments_movie_550");
//!
//! fn example() -> Result<()> {
//!     Err(Error::validation("comment is empty"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
