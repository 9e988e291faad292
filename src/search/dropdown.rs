//! Plain-data model of the autocomplete dropdown.
//!
//! The controller composes a [`Dropdown`] from the two search sources; any
//! rendering surface turns it into visual elements.

use cinetech_common::{MediaId, MediaKind};
use regex::RegexBuilder;

use crate::catalog::{Keyword, MultiResult};

/// A run of suggestion text, flagged when it matches the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub text: String,
    pub matched: bool,
}

/// A keyword suggestion with the query highlighted inside its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSuggestion {
    pub id: u64,
    pub name: String,
    pub segments: Vec<Highlight>,
}

/// A movie or series suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSuggestion {
    pub id: MediaId,
    pub kind: MediaKind,
    pub title: String,
    pub year: Option<i32>,
    pub poster_path: Option<String>,
}

/// Caps applied when composing a dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub keywords: usize,
    pub media: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            keywords: 3,
            media: 5,
        }
    }
}

/// Contents of a visible dropdown: keywords first, then media.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dropdown {
    /// Query the suggestions were fetched for.
    pub query: String,
    pub keywords: Vec<KeywordSuggestion>,
    pub media: Vec<MediaSuggestion>,
}

impl Dropdown {
    /// Merge the two sources. A `None` source failed and contributes nothing.
    pub fn compose(
        query: &str,
        keywords: Option<Vec<Keyword>>,
        media: Option<Vec<MultiResult>>,
        limits: Limits,
    ) -> Self {
        let keywords = keywords
            .unwrap_or_default()
            .into_iter()
            .take(limits.keywords)
            .map(|k| KeywordSuggestion {
                segments: highlight(&k.name, query),
                id: k.id,
                name: k.name,
            })
            .collect();

        let media = media
            .unwrap_or_default()
            .into_iter()
            .filter_map(MultiResult::into_title)
            .take(limits.media)
            .map(|t| MediaSuggestion {
                year: t.year(),
                id: t.id,
                kind: t.kind,
                title: t.title,
                poster_path: t.poster_path,
            })
            .collect();

        Self {
            query: query.to_string(),
            keywords,
            media,
        }
    }

    /// Whether both sections are empty; rendered as a "no results" entry.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.media.is_empty()
    }
}

/// Split `text` into runs, marking case-insensitive occurrences of `query`.
pub fn highlight(text: &str, query: &str) -> Vec<Highlight> {
    let query = query.trim();
    let plain = || {
        vec![Highlight {
            text: text.to_string(),
            matched: false,
        }]
    };

    if query.is_empty() {
        return plain();
    }

    let Ok(pattern) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        return plain();
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.start() > last {
            segments.push(Highlight {
                text: text[last..m.start()].to_string(),
                matched: false,
            });
        }
        segments.push(Highlight {
            text: m.as_str().to_string(),
            matched: true,
        });
        last = m.end();
    }
    if last < text.len() || segments.is_empty() {
        segments.push(Highlight {
            text: text[last..].to_string(),
            matched: false,
        });
    }
    segments
}
