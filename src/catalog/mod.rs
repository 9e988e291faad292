//! Remote catalog access.
//!
//! # Module layout
//!
//! - [`provider`] -- The [`CatalogProvider`] trait every backend implements.
//! - [`endpoint`] -- The fixed set of query kinds and their request paths.
//! - [`types`] -- Typed response payloads.
//! - [`tmdb`] -- The TMDB v3 backend.
//! - [`images`] -- Poster / backdrop / profile URL construction.
//! - [`genres`] -- Lazily cached genre-id lookup.

pub mod endpoint;
pub mod genres;
pub mod images;
pub mod provider;
pub mod tmdb;
pub mod types;

pub use endpoint::{Endpoint, Listing, TimeWindow};
pub use genres::GenreDirectory;
pub use images::{ImageSize, ImageUrls};
pub use provider::CatalogProvider;
pub use tmdb::TmdbCatalog;
pub use types::{
    CastMember, Genre, Keyword, MultiResult, Page, PersonSummary, Review, TitleDetails,
    TitleSummary,
};
