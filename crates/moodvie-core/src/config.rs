use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::MoodvieError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub general: GeneralConfig,
    #[serde(default)]
    pub appearance: AppearanceConfig,
    pub detail: DetailConfig,
    pub notifications: NotificationsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    pub poster_base_url: String,
}

/// Light/dark preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
    #[default]
    System,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default)]
    pub mode: ThemeMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailConfig {
    pub rating_animation_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
    pub toast_duration_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

impl AppConfig {
    /// Load config: the user file if it exists, otherwise built-in defaults.
    pub fn load() -> Result<Self, MoodvieError> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path, falling back to defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self, MoodvieError> {
        if !path.exists() {
            return Self::defaults();
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| MoodvieError::Config(e.to_string()))
    }

    fn defaults() -> Result<Self, MoodvieError> {
        toml::from_str(DEFAULT_CONFIG).map_err(|e| MoodvieError::Config(e.to_string()))
    }

    /// Full URL of a poster reference.
    pub fn poster_url(&self, poster_ref: &str) -> Option<String> {
        let poster_ref = poster_ref.trim();
        if poster_ref.is_empty() {
            return None;
        }
        if poster_ref.starts_with("http://") || poster_ref.starts_with("https://") {
            return Some(poster_ref.to_string());
        }
        let base = self.general.poster_base_url.trim_end_matches('/');
        let path = poster_ref.trim_start_matches('/');
        Some(format!("{base}/{path}"))
    }

    pub fn rating_animation(&self) -> Duration {
        Duration::from_millis(self.detail.rating_animation_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.notifications.toast_duration_secs.max(1))
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Directory for the database and log files.
    pub fn data_dir() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Path to the database file.
    pub fn db_path() -> PathBuf {
        Self::data_dir().join("moodvie.db")
    }

    /// Ensure the data directory exists and return the DB path.
    pub fn ensure_db_path() -> Result<PathBuf, MoodvieError> {
        let path = Self::db_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(path)
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "moodvie")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.detail.rating_animation_ms, 2000);
        assert_eq!(config.rating_animation(), Duration::from_secs(2));
        assert_eq!(config.toast_duration(), Duration::from_secs(4));
        assert_eq!(config.appearance.mode, ThemeMode::System);
    }

    #[test]
    fn test_poster_url_joins_base() {
        let config = AppConfig::default();
        assert_eq!(
            config.poster_url("/abc.jpg").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(
            config.poster_url("https://cdn.example/x.png").as_deref(),
            Some("https://cdn.example/x.png")
        );
        assert_eq!(config.poster_url("  "), None);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.logging.filter, "moodvie=info,moodvie_core=info");
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut content = DEFAULT_CONFIG.replace("mode = \"system\"", "mode = \"dark\"");
        content = content.replace("rating_animation_ms = 2000", "rating_animation_ms = 500");
        std::fs::write(&path, content).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.appearance.mode, ThemeMode::Dark);
        assert_eq!(loaded.detail.rating_animation_ms, 500);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general\n").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(MoodvieError::Config(_))
        ));
    }
}
