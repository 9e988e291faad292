//! The enumerated query kinds of the remote catalog and their paths.

use std::fmt;
use std::str::FromStr;

use cinetech_common::{Error, MediaId, MediaKind};

/// Trending time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl FromStr for TimeWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            other => Err(Error::validation(format!("unknown time window '{other}'"))),
        }
    }
}

/// Paginated title listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listing {
    PopularMovies,
    PopularSeries,
    NowPlayingMovies,
    UpcomingMovies,
    AiringTodaySeries,
    OnTheAirSeries,
    Trending(MediaKind, TimeWindow),
}

impl Listing {
    /// Kind of the titles the listing returns.
    pub const fn kind(self) -> MediaKind {
        match self {
            Self::PopularMovies | Self::NowPlayingMovies | Self::UpcomingMovies => {
                MediaKind::Movie
            }
            Self::PopularSeries | Self::AiringTodaySeries | Self::OnTheAirSeries => {
                MediaKind::Series
            }
            Self::Trending(kind, _) => kind,
        }
    }

    /// Whether the endpoint accepts a `page` parameter.
    pub const fn is_paginated(self) -> bool {
        !matches!(self, Self::Trending(..))
    }

    fn path(self) -> String {
        match self {
            Self::PopularMovies => "/movie/popular".into(),
            Self::PopularSeries => "/tv/popular".into(),
            Self::NowPlayingMovies => "/movie/now_playing".into(),
            Self::UpcomingMovies => "/movie/upcoming".into(),
            Self::AiringTodaySeries => "/tv/airing_today".into(),
            Self::OnTheAirSeries => "/tv/on_the_air".into(),
            Self::Trending(kind, window) => format!("/trending/{}/{}", kind, window.as_str()),
        }
    }
}

/// Every request the catalog client can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Listing(Listing),
    SearchMulti,
    SearchTitles(MediaKind),
    SearchKeyword,
    /// Details with credits, reviews and similar titles embedded.
    Details(MediaKind, MediaId),
    Similar(MediaKind, MediaId),
    GenreList(MediaKind),
}

impl Endpoint {
    /// Request path relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Self::Listing(listing) => listing.path(),
            Self::SearchMulti => "/search/multi".into(),
            Self::SearchTitles(kind) => format!("/search/{kind}"),
            Self::SearchKeyword => "/search/keyword".into(),
            Self::Details(kind, id) => format!("/{kind}/{id}"),
            Self::Similar(kind, id) => format!("/{kind}/{id}/similar"),
            Self::GenreList(kind) => format!("/genre/{kind}/list"),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
