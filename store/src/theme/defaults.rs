use crate::theme::types::ThemeConfig;
use once_cell::sync::Lazy;

/// Bundled presets used when no theme list has been saved yet
pub const DEFAULT_THEMES_JSON: &str = include_str!("../../assets/default_themes.json");

static DEFAULT_THEMES: Lazy<Vec<ThemeConfig>> = Lazy::new(|| {
    serde_json::from_str(DEFAULT_THEMES_JSON).unwrap_or_else(|e| {
        log::error!("Bundled default themes are invalid: {e}");
        Vec::new()
    })
});

/// The bundled seed list, in display order.
pub fn default_themes() -> Vec<ThemeConfig> {
    DEFAULT_THEMES.clone()
}
