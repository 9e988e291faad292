//! Search: the debounced autocomplete controller and the full results view.

pub mod controller;
pub mod dropdown;
pub mod results;

pub use controller::{Navigation, Phase, SearchController, SearchView};
pub use dropdown::{highlight, Dropdown, Highlight, KeywordSuggestion, Limits, MediaSuggestion};
pub use results::search_all;
