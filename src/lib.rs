//! Cinetech - Movie and TV catalog front end
//!
//! This library crate exposes the catalog client, the search controller and
//! the comment sections used by the `cinetech` binary.

pub mod catalog;
pub mod comments;
pub mod config;
pub mod favorites;
pub mod search;
