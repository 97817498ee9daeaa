use serde::Serialize;
use std::path::{Path, PathBuf};
use theme_store::persist::write_atomic;
use theme_store::render::{AppliedTheme, ThemeRenderer};
use theme_store::{ThemeError, ThemeResult};

/// Applied theme as written for the reader UI to pick up.
#[derive(Debug, Serialize)]
struct AppliedThemeFile {
    primary: String,
    accent: String,
    background: String,
    bottom_background: String,
    night_mode: bool,
    applied_at: String,
}

impl From<&AppliedTheme> for AppliedThemeFile {
    fn from(theme: &AppliedTheme) -> Self {
        Self {
            primary: theme.primary.to_hex_rgb(),
            accent: theme.accent.to_hex_rgb(),
            background: theme.background.to_hex_rgb(),
            bottom_background: theme.bottom_background.to_hex_rgb(),
            night_mode: theme.night_mode,
            applied_at: chrono::Local::now().to_rfc3339(),
        }
    }
}

/// Renderer that publishes every committed theme as a TOML file.
pub struct TomlThemeRenderer {
    path: PathBuf,
}

impl TomlThemeRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeRenderer for TomlThemeRenderer {
    fn commit(&mut self, theme: &AppliedTheme) -> ThemeResult<()> {
        let body = toml::to_string_pretty(&AppliedThemeFile::from(theme))
            .map_err(|e| ThemeError::Render(e.to_string()))?;
        write_atomic(&self.path, body.as_bytes())?;
        log::debug!("Wrote applied theme to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;
    use theme_store::Color;

    #[test]
    fn test_commit_writes_hex_colors() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = TomlThemeRenderer::new(dir.path().join("out").join("applied.toml"));
        let theme = AppliedTheme {
            primary: Color::from_rgb(0x11, 0x22, 0x33),
            accent: Color::BLACK,
            background: Color::WHITE,
            bottom_background: Color::from_rgb(0xCC, 0xCC, 0xCC),
            night_mode: false,
        };

        assert_ok!(renderer.commit(&theme));

        let written = std::fs::read_to_string(renderer.path()).unwrap();
        let value: toml::Value = toml::from_str(&written).unwrap();
        assert_eq!(value["primary"].as_str(), Some("#112233"));
        assert_eq!(value["bottom_background"].as_str(), Some("#CCCCCC"));
        assert_eq!(value["night_mode"].as_bool(), Some(false));
        assert_some!(value.get("applied_at"));
    }
}
