//! User configuration — provider credentials, result limit, grid shape.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/gif-keyboard/config.toml` (default
//! `~/.config/gif-keyboard/config.toml`).

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::request::DEFAULT_LIMIT;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Results requested per fetch.
    pub limit: NonZeroU32,
    /// Grid columns.
    pub columns: usize,
    pub giphy_api_key: Option<String>,
    /// Local JSON catalog; takes precedence over Giphy when set.
    pub catalog_path: Option<PathBuf>,
    /// Giphy content rating (`g`, `pg`, `pg-13`, `r`).
    pub rating: String,
    pub request_timeout_secs: u64,
    pub tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            columns: 2,
            giphy_api_key: None,
            catalog_path: None,
            rating: "g".into(),
            request_timeout_secs: 10,
            tick_ms: 100,
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) => {
                if path.exists() {
                    tracing::warn!("unreadable config {}: {err}", path.display());
                }
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "limit" => {
                    if let Ok(v) = value.parse::<u32>() {
                        // Giphy caps public keys at 50 per page.
                        if let Some(n) = NonZeroU32::new(v.clamp(1, 50)) {
                            config.limit = n;
                        }
                    }
                }
                "columns" => {
                    if let Ok(v) = value.parse::<usize>() {
                        config.columns = v.clamp(1, 6);
                    }
                }
                "giphy_api_key" => {
                    config.giphy_api_key = (!value.is_empty()).then(|| value.to_string());
                }
                "catalog_path" => {
                    config.catalog_path = (!value.is_empty()).then(|| PathBuf::from(value));
                }
                "rating" => {
                    if !value.is_empty() {
                        config.rating = value.to_lowercase();
                    }
                }
                "request_timeout_secs" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.request_timeout_secs = v.clamp(1, 120);
                    }
                }
                "tick_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.tick_ms = v.clamp(16, 1000);
                    }
                }
                _ => tracing::debug!("ignoring unknown config key {key:?}"),
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# gif-keyboard configuration".to_string(),
            String::new(),
            "# Fetching".to_string(),
            format!("limit = {}", self.limit),
            format!("rating = \"{}\"", self.rating),
            format!("request_timeout_secs = {}", self.request_timeout_secs),
        ];
        if let Some(key) = &self.giphy_api_key {
            lines.push(format!("giphy_api_key = \"{key}\""));
        }
        if let Some(path) = &self.catalog_path {
            lines.push(format!("catalog_path = \"{}\"", path.display()));
        }
        lines.extend([
            String::new(),
            "# Display".to_string(),
            format!("columns = {}", self.columns),
            format!("tick_ms = {}", self.tick_ms),
            String::new(),
        ]);
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/gif-keyboard/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("gif-keyboard").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_keys_and_clamps() {
        let config = AppConfig::parse(
            "# comment\n\
             limit = 500\n\
             columns = 0\n\
             giphy_api_key = \"abc\"\n\
             catalog_path = /tmp/gifs.json\n\
             rating = PG\n\
             request_timeout_secs = 3\n\
             bogus = 1\n",
        );
        assert_eq!(config.limit.get(), 50);
        assert_eq!(config.columns, 1);
        assert_eq!(config.giphy_api_key.as_deref(), Some("abc"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/gifs.json")));
        assert_eq!(config.rating, "pg");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.tick_ms, 100);
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let config = AppConfig::parse("limit = lots\ncolumns = wide\nno equals sign\n");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.limit.get(), 20);
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            limit: NonZeroU32::new(12).expect("non-zero"),
            columns: 4,
            giphy_api_key: Some("k3y".into()),
            catalog_path: Some(PathBuf::from("/srv/catalog.json")),
            ..AppConfig::default()
        };

        config.save_to(&path).expect("save");
        assert_eq!(AppConfig::load_from(&path), config);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(
            AppConfig::load_from(&dir.path().join("absent.toml")),
            AppConfig::default()
        );
    }
}
