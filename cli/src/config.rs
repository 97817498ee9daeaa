use crate::error::{AppError, AppResult};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use theme_store::theme::CONFIG_FILE_NAME;

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_NAME: &str = "folio";

/// Main application configuration
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    data_dir: Option<PathBuf>,
    theme_file: Option<String>,
    preferences_file: Option<String>,
    applied_theme_file: Option<String>,
    background_dir: Option<PathBuf>,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

/// Load configuration from an optional file plus `FOLIO__*` environment
/// variables. An explicit `path` must exist; the default `folio.toml` may not.
pub fn load_config(path: Option<&Path>) -> AppResult<AppConfig> {
    dotenv::dotenv().ok();

    let file_source = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };
    let env_source = Environment::with_prefix("FOLIO").separator("__");

    let config = Config::builder()
        .add_source(file_source)
        .add_source(env_source) // environment entries override file values
        .build()
        .map_err(|e| {
            AppError::Config(format!(
                "Configuration loading failed: {e}. Please check your folio.toml file and FOLIO__* environment variables."
            ))
        })?;

    config
        .try_deserialize::<AppConfig>()
        .map_err(|e| AppError::Config(format!("Failed to deserialize config: {e}")))
}

impl AppConfig {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("folio")
        })
    }

    pub fn theme_file(&self) -> PathBuf {
        self.data_dir()
            .join(self.theme_file.as_deref().unwrap_or(CONFIG_FILE_NAME))
    }

    pub fn preferences_file(&self) -> PathBuf {
        self.data_dir()
            .join(self.preferences_file.as_deref().unwrap_or("preferences.json"))
    }

    pub fn applied_theme_file(&self) -> PathBuf {
        self.data_dir()
            .join(self.applied_theme_file.as_deref().unwrap_or("applied_theme.toml"))
    }

    pub fn background_dir(&self) -> PathBuf {
        self.background_dir
            .clone()
            .unwrap_or_else(|| self.data_dir().join("bgImage"))
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;
    use std::fs;

    #[test]
    fn test_defaults_live_under_data_dir() {
        let config: AppConfig = toml::from_str("data_dir = \"/srv/folio\"").unwrap();

        assert_eq!(config.theme_file(), PathBuf::from("/srv/folio/themeConfig.json"));
        assert_eq!(config.preferences_file(), PathBuf::from("/srv/folio/preferences.json"));
        assert_eq!(config.background_dir(), PathBuf::from("/srv/folio/bgImage"));
        assert_eq!(config.logging().level(), "info");
        assert_none!(config.logging().file());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            "data_dir = \"/tmp/folio-test\"\ntheme_file = \"themes.json\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = assert_ok!(load_config(Some(&path)));

        assert_eq!(config.theme_file(), PathBuf::from("/tmp/folio-test/themes.json"));
        assert_eq!(config.logging().level(), "debug");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = assert_err!(load_config(Some(&dir.path().join("absent.toml"))));
        assert!(matches!(err, AppError::Config(_)));
    }
}
