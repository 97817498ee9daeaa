use crate::background::{BackgroundSettings, MAX_BLUR};
use crate::color::Color;
use crate::error::{ThemeError, ThemeResult};
use crate::preferences::{PrefValue, PreferenceStore, keys};
use crate::theme::types::ColorSlot;

/// The active theme selection, read from and written to the preference store
/// as individual keys.
///
/// Unset colors resolve to white, except the accent which resolves to black.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveThemeState {
    pub primary: Option<Color>,
    pub accent: Option<Color>,
    pub background: Option<Color>,
    pub bottom_background: Option<Color>,
    pub background_image: Option<String>,
    pub background_blur: u32,
}

impl ActiveThemeState {
    pub fn read(prefs: &dyn PreferenceStore) -> ThemeResult<Self> {
        let background = Self::read_background(prefs)?;
        Ok(Self {
            primary: read_color(prefs, keys::PRIMARY)?,
            accent: read_color(prefs, keys::ACCENT)?,
            background: read_color(prefs, keys::BACKGROUND)?,
            bottom_background: read_color(prefs, keys::BOTTOM_BACKGROUND)?,
            background_image: background.image,
            background_blur: background.blur,
        })
    }

    /// Background image settings only; does not touch the color keys.
    pub fn read_background(prefs: &dyn PreferenceStore) -> ThemeResult<BackgroundSettings> {
        let blur = prefs
            .get_int(keys::BG_IMAGE_BLURRING)?
            .unwrap_or(0)
            .clamp(0, i64::from(MAX_BLUR)) as u32;
        Ok(BackgroundSettings {
            image: prefs.get_string(keys::BG_IMAGE)?,
            blur,
        })
    }

    /// Store all four colors in a single batch.
    pub fn write_colors(prefs: &mut dyn PreferenceStore, colors: [Color; 4]) -> ThemeResult<()> {
        let [primary, accent, background, bottom_background] = colors;
        prefs.put_all(vec![
            color_entry(keys::PRIMARY, primary),
            color_entry(keys::ACCENT, accent),
            color_entry(keys::BACKGROUND, background),
            color_entry(keys::BOTTOM_BACKGROUND, bottom_background),
        ])
    }

    pub fn write_color(
        prefs: &mut dyn PreferenceStore,
        slot: ColorSlot,
        color: Color,
    ) -> ThemeResult<()> {
        let key = match slot {
            ColorSlot::Primary => keys::PRIMARY,
            ColorSlot::Accent => keys::ACCENT,
            ColorSlot::Background => keys::BACKGROUND,
            ColorSlot::BottomBackground => keys::BOTTOM_BACKGROUND,
        };
        prefs.put_all(vec![color_entry(key, color)])
    }

    pub fn primary_or_default(&self) -> Color {
        self.primary.unwrap_or(Color::WHITE)
    }

    pub fn accent_or_default(&self) -> Color {
        self.accent.unwrap_or(Color::BLACK)
    }

    pub fn background_or_default(&self) -> Color {
        self.background.unwrap_or(Color::WHITE)
    }

    pub fn bottom_background_or_default(&self) -> Color {
        self.bottom_background.unwrap_or(Color::WHITE)
    }
}

fn color_entry(key: &str, color: Color) -> (String, PrefValue) {
    (key.to_string(), PrefValue::Int(color.into()))
}

fn read_color(prefs: &dyn PreferenceStore, key: &str) -> ThemeResult<Option<Color>> {
    match prefs.get(key) {
        None => Ok(None),
        Some(PrefValue::Int(value)) => Color::try_from(value).map(Some),
        Some(PrefValue::Str(value)) => Color::parse(&value).map(Some),
        Some(PrefValue::Bool(value)) => Err(ThemeError::ColorParse {
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::MemoryPreferenceStore;

    #[test]
    fn test_unset_state_resolves_defaults() {
        let prefs = MemoryPreferenceStore::new();
        let state = ActiveThemeState::read(&prefs).unwrap();

        assert_eq!(state, ActiveThemeState::default());
        assert_eq!(state.primary_or_default(), Color::WHITE);
        assert_eq!(state.accent_or_default(), Color::BLACK);
        assert_eq!(state.background_or_default(), Color::WHITE);
        assert_eq!(state.bottom_background_or_default(), Color::WHITE);
    }

    #[test]
    fn test_write_colors_then_read() {
        let mut prefs = MemoryPreferenceStore::new();
        let colors = [
            Color::from_rgb(1, 2, 3),
            Color::from_rgb(4, 5, 6),
            Color::from_rgb(250, 250, 250),
            Color::from_rgb(7, 8, 9),
        ];

        ActiveThemeState::write_colors(&mut prefs, colors).unwrap();
        let state = ActiveThemeState::read(&prefs).unwrap();

        assert_eq!(state.primary, Some(colors[0]));
        assert_eq!(state.accent, Some(colors[1]));
        assert_eq!(state.background, Some(colors[2]));
        assert_eq!(state.bottom_background, Some(colors[3]));
    }

    #[test]
    fn test_string_color_values_are_parsed() {
        let mut prefs = MemoryPreferenceStore::new();
        prefs
            .put(keys::ACCENT, PrefValue::Str("#445566".into()))
            .unwrap();
        let state = ActiveThemeState::read(&prefs).unwrap();
        assert_eq!(state.accent, Some(Color::from_rgb(0x44, 0x55, 0x66)));

        prefs
            .put(keys::ACCENT, PrefValue::Str("teal-ish".into()))
            .unwrap();
        assert!(matches!(
            ActiveThemeState::read(&prefs),
            Err(ThemeError::ColorParse { .. })
        ));
    }

    #[test]
    fn test_blur_is_clamped() {
        let mut prefs = MemoryPreferenceStore::new();
        prefs
            .put(keys::BG_IMAGE_BLURRING, PrefValue::Int(-4))
            .unwrap();
        assert_eq!(ActiveThemeState::read_background(&prefs).unwrap().blur, 0);

        prefs
            .put(keys::BG_IMAGE_BLURRING, PrefValue::Int(400))
            .unwrap();
        assert_eq!(
            ActiveThemeState::read_background(&prefs).unwrap().blur,
            MAX_BLUR
        );
    }
}
