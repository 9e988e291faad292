use cinetech_common::MediaKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cinetech::catalog::TimeWindow;

#[derive(Parser)]
#[command(name = "cinetech")]
#[command(author, version, about = "Movie and TV catalog browser")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List popular titles
    Popular {
        /// movie or tv
        #[arg(short, long, default_value = "movie")]
        kind: MediaKind,

        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// List trending titles
    Trending {
        #[arg(short, long, default_value = "movie")]
        kind: MediaKind,

        /// day or week
        #[arg(short, long, default_value = "week")]
        window: TimeWindow,
    },

    /// List titles in theaters now (movies) or airing today (series)
    NewReleases {
        #[arg(short, long, default_value = "movie")]
        kind: MediaKind,

        /// Upcoming movies or series still on the air
        #[arg(long)]
        upcoming: bool,

        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Show one title with cast, comments and similar titles
    Details {
        kind: MediaKind,
        id: u64,
    },

    /// Search movies and series
    Search {
        #[arg(required = true)]
        query: String,
    },

    /// Interactive autocomplete: each stdin line replaces the search input
    ///
    /// Prefix a line with '=' to submit it; an empty line closes the dropdown.
    Suggest,

    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Read and write comments on a title
    Comments {
        #[command(subcommand)]
        action: CommentsAction,
    },

    /// Validate configuration file
    Validate,
}

#[derive(Subcommand)]
pub enum FavoritesAction {
    /// List favorites, newest first
    List,

    /// Add a title to favorites
    Add { kind: MediaKind, id: u64 },

    /// Remove a title from favorites
    Remove { kind: MediaKind, id: u64 },
}

#[derive(Subcommand)]
pub enum CommentsAction {
    /// Show the comment thread of a title
    List { kind: MediaKind, id: u64 },

    /// Post a comment
    Add {
        kind: MediaKind,
        id: u64,
        content: String,
    },

    /// Reply to a top-level comment
    Reply {
        kind: MediaKind,
        id: u64,
        #[arg(allow_negative_numbers = true)]
        parent: i64,
        content: String,
    },

    /// Delete a local comment and its replies
    Delete {
        kind: MediaKind,
        id: u64,
        #[arg(allow_negative_numbers = true)]
        comment: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
