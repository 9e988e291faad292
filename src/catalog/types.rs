//! Typed response payloads of the remote catalog.
//!
//! Movies and series use different field names for the same concepts
//! (`title` / `name`, `release_date` / `first_air_date`); the raw wire shapes
//! are private and normalised into one set of public types here.

use chrono::{DateTime, Utc};
use cinetech_common::{MediaId, MediaKind};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    /// A single page holding `results`.
    pub fn of(results: Vec<T>) -> Self {
        let total = results.len() as u32;
        Self {
            page: 1,
            results,
            total_pages: 1,
            total_results: total,
        }
    }

    /// Transform every result, keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            results: self.results.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }

    /// Whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

// ---------------------------------------------------------------------------
// Titles
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawTitle {
    id: u64,
    title: Option<String>,
    name: Option<String>,
    original_title: Option<String>,
    original_name: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f64>,
    popularity: Option<f64>,
    #[serde(default)]
    genre_ids: Vec<u32>,
    media_type: Option<String>,
}

/// A movie or series as it appears in listings and search results.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawTitle")]
pub struct TitleSummary {
    pub id: MediaId,
    pub kind: MediaKind,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    /// Release date (movies) or first air date (series), `YYYY-MM-DD`.
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub popularity: Option<f64>,
    pub genre_ids: Vec<u32>,
}

impl From<RawTitle> for TitleSummary {
    fn from(raw: RawTitle) -> Self {
        let kind = match raw.media_type.as_deref() {
            Some("tv") => MediaKind::Series,
            Some("movie") => MediaKind::Movie,
            _ if raw.name.is_some() || raw.first_air_date.is_some() => MediaKind::Series,
            _ => MediaKind::Movie,
        };

        Self {
            id: MediaId::new(raw.id),
            kind,
            title: raw.title.or(raw.name).unwrap_or_default(),
            original_title: raw.original_title.or(raw.original_name),
            overview: non_empty(raw.overview),
            release_date: non_empty(raw.release_date).or(non_empty(raw.first_air_date)),
            poster_path: non_empty(raw.poster_path),
            backdrop_path: non_empty(raw.backdrop_path),
            vote_average: raw.vote_average,
            popularity: raw.popularity,
            genre_ids: raw.genre_ids,
        }
    }
}

impl TitleSummary {
    /// Override the inferred kind with the one the endpoint guarantees.
    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = kind;
        self
    }

    /// Four-digit release year, if the date is known.
    pub fn year(&self) -> Option<i32> {
        parse_year(self.release_date.as_deref())
    }
}

/// A person hit of a multi search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PersonSummary {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// One hit of a multi search, discriminated by `media_type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "media_type")]
pub enum MultiResult {
    #[serde(rename = "movie")]
    Movie(TitleSummary),
    #[serde(rename = "tv")]
    Series(TitleSummary),
    #[serde(rename = "person")]
    Person(PersonSummary),
    #[serde(other)]
    Other,
}

impl MultiResult {
    /// The title carried by a movie or series hit.
    pub fn into_title(self) -> Option<TitleSummary> {
        match self {
            Self::Movie(t) => Some(t.with_kind(MediaKind::Movie)),
            Self::Series(t) => Some(t.with_kind(MediaKind::Series)),
            Self::Person(_) | Self::Other => None,
        }
    }
}

/// A keyword suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Keyword {
    pub id: u64,
    pub name: String,
}

/// A genre of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenreList {
    #[serde(default)]
    pub(crate) genres: Vec<Genre>,
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

/// Author block of a review.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AuthorDetails {
    pub username: Option<String>,
    pub rating: Option<f64>,
}

/// A user review published on the remote catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Review {
    pub id: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub author_details: Option<AuthorDetails>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    /// Display name: `author`, else the author's username.
    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_deref()
            .filter(|a| !a.is_empty())
            .or_else(|| {
                self.author_details
                    .as_ref()
                    .and_then(|d| d.username.as_deref())
            })
    }
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

/// A cast member from the embedded credits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Credits {
    #[serde(default)]
    cast: Vec<CastMember>,
}

#[derive(Debug, Deserialize)]
struct RawDetails {
    id: u64,
    title: Option<String>,
    name: Option<String>,
    original_title: Option<String>,
    original_name: Option<String>,
    overview: Option<String>,
    tagline: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    episode_run_time: Vec<u32>,
    number_of_seasons: Option<u32>,
    number_of_episodes: Option<u32>,
    #[serde(default)]
    genres: Vec<Genre>,
    vote_average: Option<f64>,
    vote_count: Option<u32>,
    popularity: Option<f64>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    credits: Option<Credits>,
    reviews: Option<Page<Review>>,
    similar: Option<Page<TitleSummary>>,
}

/// Full description of one title, with credits, reviews and similar titles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawDetails")]
pub struct TitleDetails {
    pub id: MediaId,
    pub kind: MediaKind,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub release_date: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    pub genres: Vec<Genre>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub cast: Vec<CastMember>,
    pub reviews: Vec<Review>,
    pub similar: Vec<TitleSummary>,
}

impl From<RawDetails> for TitleDetails {
    fn from(raw: RawDetails) -> Self {
        let kind = if raw.name.is_some() || raw.first_air_date.is_some() {
            MediaKind::Series
        } else {
            MediaKind::Movie
        };

        Self {
            id: MediaId::new(raw.id),
            kind,
            title: raw.title.or(raw.name).unwrap_or_default(),
            original_title: raw.original_title.or(raw.original_name),
            overview: non_empty(raw.overview),
            tagline: non_empty(raw.tagline),
            release_date: non_empty(raw.release_date).or(non_empty(raw.first_air_date)),
            runtime_minutes: raw.runtime.or(raw.episode_run_time.first().copied()),
            number_of_seasons: raw.number_of_seasons,
            number_of_episodes: raw.number_of_episodes,
            genres: raw.genres,
            vote_average: raw.vote_average,
            vote_count: raw.vote_count,
            popularity: raw.popularity,
            poster_path: non_empty(raw.poster_path),
            backdrop_path: non_empty(raw.backdrop_path),
            cast: raw.credits.unwrap_or_default().cast,
            reviews: raw.reviews.map(|p| p.results).unwrap_or_default(),
            similar: raw.similar.map(|p| p.results).unwrap_or_default(),
        }
    }
}

impl TitleDetails {
    /// Override the inferred kind, propagating it to similar titles.
    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = kind;
        self.similar = self
            .similar
            .into_iter()
            .map(|t| t.with_kind(kind))
            .collect();
        self
    }

    pub fn year(&self) -> Option<i32> {
        parse_year(self.release_date.as_deref())
    }

    /// The condensed listing form of this title, as stored in favorites.
    pub fn summary(&self) -> TitleSummary {
        TitleSummary {
            id: self.id,
            kind: self.kind,
            title: self.title.clone(),
            original_title: self.original_title.clone(),
            overview: self.overview.clone(),
            release_date: self.release_date.clone(),
            poster_path: self.poster_path.clone(),
            backdrop_path: self.backdrop_path.clone(),
            vote_average: self.vote_average,
            popularity: self.popularity,
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Extract a four-digit year from a date string like `"2023-04-15"`.
pub(crate) fn parse_year(date: Option<&str>) -> Option<i32> {
    date.and_then(|d| d.get(..4)).and_then(|y| y.parse().ok())
}
