//! Plain-text views for the terminal.

use std::fmt::Write;

use cinetech::catalog::{ImageSize, ImageUrls, TitleDetails, TitleSummary};
use cinetech::comments::{
    format_rating, format_release_date, format_runtime, format_timestamp, Thread,
    EMPTY_THREAD_MESSAGE,
};
use cinetech::search::{Dropdown, Highlight, Phase, SearchView};
use cinetech_store::{CommentEntry, FavoriteEntry};

const FAVORITE_MARK: &str = "♥";
const NO_RESULTS: &str = "Aucun résultat";

fn year(date: Option<i32>) -> String {
    date.map(|y| format!(" ({y})")).unwrap_or_default()
}

/// One line of a listing.
pub fn title_line(title: &TitleSummary, genres: &[String], favorite: bool) -> String {
    let mut line = format!(
        "{:>8}  {}{}  {}",
        title.id,
        title.title,
        year(title.year()),
        format_rating(title.vote_average)
    );
    if !genres.is_empty() {
        let _ = write!(line, "  [{}]", genres.join(", "));
    }
    if favorite {
        let _ = write!(line, "  {FAVORITE_MARK}");
    }
    line
}

pub fn details(details: &TitleDetails, images: &ImageUrls, favorite: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}{} [{}]{}",
        details.title,
        year(details.year()),
        details.kind.label(),
        if favorite {
            format!(" {FAVORITE_MARK}")
        } else {
            String::new()
        }
    );
    if let Some(tagline) = &details.tagline {
        let _ = writeln!(out, "\"{tagline}\"");
    }
    let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
    let _ = writeln!(out, "Sortie : {}", format_release_date(details.release_date.as_deref()));
    let _ = writeln!(out, "Durée : {}", format_runtime(details.runtime_minutes));
    let _ = writeln!(out, "Note : {}", format_rating(details.vote_average));
    if !genres.is_empty() {
        let _ = writeln!(out, "Genres : {}", genres.join(", "));
    }
    let _ = writeln!(
        out,
        "Affiche : {}",
        images.url(details.poster_path.as_deref(), ImageSize::Poster)
    );
    if let Some(overview) = &details.overview {
        let _ = writeln!(out, "\n{overview}");
    }

    if !details.cast.is_empty() {
        let _ = writeln!(out, "\nDistribution :");
        for member in details.cast.iter().take(10) {
            let role = member
                .character
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|c| format!(" ({c})"))
                .unwrap_or_default();
            let _ = writeln!(out, "  {}{}", member.name, role);
        }
    }

    if !details.similar.is_empty() {
        let _ = writeln!(out, "\nTitres similaires :");
        for title in details.similar.iter().take(6) {
            let _ = writeln!(out, "  {}", title_line(title, &[], false));
        }
    }
    out
}

fn comment_block(out: &mut String, comment: &CommentEntry, indent: &str) {
    let marker = if comment.is_local() { " *" } else { "" };
    let _ = writeln!(
        out,
        "{indent}#{} {} - {}{marker}",
        comment.id,
        comment.author,
        format_timestamp(comment.created_at)
    );
    for line in comment.content.lines() {
        let _ = writeln!(out, "{indent}  {line}");
    }
}

/// The comment section; local comments carry a `*`.
pub fn thread(thread: &Thread) -> String {
    if thread.is_empty() {
        return format!("{EMPTY_THREAD_MESSAGE}\n");
    }

    let mut out = String::new();
    for node in &thread.nodes {
        comment_block(&mut out, &node.comment, "");
        for reply in &node.replies {
            comment_block(&mut out, reply, "    ");
        }
    }
    out
}

fn highlighted(segments: &[Highlight]) -> String {
    segments
        .iter()
        .map(|s| {
            if s.matched {
                format!("[{}]", s.text)
            } else {
                s.text.clone()
            }
        })
        .collect()
}

/// Keywords first with the query bracketed, then media.
pub fn dropdown(dropdown: &Dropdown) -> String {
    if dropdown.is_empty() {
        return format!("  {NO_RESULTS}\n");
    }

    let mut out = String::new();
    for keyword in &dropdown.keywords {
        let _ = writeln!(out, "  ? {}", highlighted(&keyword.segments));
    }
    for media in &dropdown.media {
        let label = match media.kind {
            cinetech_common::MediaKind::Movie => "Film",
            cinetech_common::MediaKind::Series => "Série",
        };
        let _ = writeln!(out, "  > {} - {}{}", media.title, label, year(media.year));
    }
    out
}

/// Prints each displayed dropdown once, skipping republished copies.
#[derive(Debug, Default)]
pub struct DropdownEcho {
    last: Option<Dropdown>,
}

impl DropdownEcho {
    /// Text to print for `view`, or `None` when nothing new is shown.
    pub fn update(&mut self, view: &SearchView) -> Option<String> {
        let Some(shown) = &view.dropdown else {
            self.last = None;
            return None;
        };
        if view.phase != Phase::Displaying || self.last.as_ref() == Some(shown) {
            return None;
        }
        self.last = Some(shown.clone());
        Some(format!("\"{}\"\n{}", shown.query, dropdown(shown)))
    }
}

pub fn favorites(entries: &[FavoriteEntry]) -> String {
    if entries.is_empty() {
        return "Aucun favori pour le moment.\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let year = entry
            .release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .map(|y| format!(" ({y})"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>8}  {:<5} {}{}  {}",
            entry.id,
            entry.kind.as_str(),
            entry.title,
            year,
            format_rating(entry.rating)
        );
    }
    out
}
