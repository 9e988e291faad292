//! Image URL construction for posters, backdrops and profile pictures.

use crate::config::CatalogConfig;

/// Rendition presets used by the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// 500px wide posters.
    Poster,
    /// Full-resolution backdrops.
    Backdrop,
    /// 185px wide cast pictures.
    Profile,
}

impl ImageSize {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Poster => "w500",
            Self::Backdrop => "original",
            Self::Profile => "w185",
        }
    }
}

/// Builds absolute image URLs from the path fragments the catalog returns.
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base_url: String,
    placeholder: String,
}

impl ImageUrls {
    pub fn new(base_url: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            placeholder: placeholder.into(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(&config.image_base_url, &config.placeholder_image)
    }

    /// Absolute URL for `path` at `size`, or the placeholder when the title
    /// has no image.
    pub fn url(&self, path: Option<&str>, size: ImageSize) -> String {
        match path.filter(|p| !p.is_empty()) {
            Some(path) => format!("{}/{}{}", self.base_url, size.as_str(), path),
            None => self.placeholder.clone(),
        }
    }
}
