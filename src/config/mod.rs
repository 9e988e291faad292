mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable overriding `catalog.api_key`.
pub const API_KEY_ENV: &str = "CINETECH_API_KEY";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./cinetech.toml", "~/.config/cinetech/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    let mut config = Config::default();
    apply_env(&mut config);
    Ok(config)
}

fn apply_env(config: &mut Config) {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            config.catalog.api_key = key.trim().to_string();
        }
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.catalog.base_url.trim().is_empty() {
        anyhow::bail!("catalog.base_url cannot be empty");
    }

    if config.search.debounce_ms == 0 {
        anyhow::bail!("search.debounce_ms must be greater than 0");
    }

    if config.search.min_query_len == 0 {
        anyhow::bail!("search.min_query_len must be at least 1");
    }

    if config.catalog.api_key.is_empty() {
        tracing::warn!(
            "No catalog API key configured; set catalog.api_key or {}",
            API_KEY_ENV
        );
    }

    Ok(())
}

/// Fail when the remote catalog is needed but no credential is configured.
pub fn require_api_key(config: &Config) -> Result<()> {
    if config.catalog.api_key.is_empty() {
        anyhow::bail!(
            "No catalog API key configured; set catalog.api_key in the config file or {}",
            API_KEY_ENV
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_catalog_front_end() {
        let config = Config::default();
        assert_eq!(config.catalog.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.catalog.language, "fr-FR");
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.search.min_query_len, 2);
        assert_eq!(config.search.max_keywords, 3);
        assert_eq!(config.search.max_media, 5);
        assert_eq!(config.comments.author, "Utilisateur");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config(
            r#"
            [catalog]
            api_key = "abc"
            language = "en-US"

            [search]
            debounce_ms = 150
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.catalog.language, "en-US");
        assert_eq!(config.search.debounce_ms, 150);
        assert_eq!(config.search.max_media, 5);
        assert_eq!(config.storage.path, std::path::PathBuf::from("./cinetech.db"));
    }

    #[test]
    fn zero_debounce_is_rejected() {
        let file = write_config("[search]\ndebounce_ms = 0\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let file = write_config("[catalog]\nbase_url = \"\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn missing_api_key_is_reported_on_demand() {
        let mut config = Config::default();
        config.catalog.api_key.clear();
        assert!(require_api_key(&config).is_err());

        config.catalog.api_key = "abc".into();
        assert!(require_api_key(&config).is_ok());
    }
}
