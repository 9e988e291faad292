use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub comments: CommentsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// TMDB API key (overridden by `CINETECH_API_KEY`)
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Response locale sent with every request
    #[serde(default = "default_language")]
    pub language: String,

    /// Image shown when a title has no poster
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,

    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}
fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}
fn default_language() -> String {
    "fr-FR".to_string()
}
fn default_placeholder_image() -> String {
    "https://via.placeholder.com/500x750?text=No+image".to_string()
}
fn default_requests_per_second() -> u32 {
    40
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
            placeholder_image: default_placeholder_image(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before searching
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Shorter (trimmed) queries never reach the network
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,

    #[serde(default = "default_max_media")]
    pub max_media: usize,
}

fn default_debounce_ms() -> u64 {
    300
}
fn default_min_query_len() -> usize {
    2
}
fn default_max_keywords() -> usize {
    3
}
fn default_max_media() -> usize {
    5
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            max_keywords: default_max_keywords(),
            max_media: default_max_media(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// SQLite file holding favorites and comments
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./cinetech.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommentsConfig {
    /// Author recorded on comments written on this device
    #[serde(default = "default_author")]
    pub author: String,
}

fn default_author() -> String {
    cinetech_store::store::DEFAULT_AUTHOR.to_string()
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            author: default_author(),
        }
    }
}
