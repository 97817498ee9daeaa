use crate::background::{self, BackgroundSettings, ImageService, MAX_BLUR, import_image};
use crate::color::Color;
use crate::error::ThemeResult;
use crate::preferences::{PrefValue, PreferenceStore, keys};
use crate::render::{AppliedTheme, EventBus, ThemeEditor, ThemeEvent, ThemeRenderer};
use crate::theme::repository::ConfigRepository;
use crate::theme::state::ActiveThemeState;
use crate::theme::types::{ColorSlot, ThemeColors, ThemeConfig};
use crate::theme::validation::BackgroundColorValidator;
use crate::validation::Validator;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::Sender;

/// Turns the stored active selection into the runtime theme.
///
/// All entry points take `&mut self`; the applier is driven from one
/// sequential context.
pub struct ThemeApplier {
    prefs: Box<dyn PreferenceStore>,
    renderer: Box<dyn ThemeRenderer>,
    images: Arc<dyn ImageService>,
    events: EventBus,
    background_dir: PathBuf,
}

impl ThemeApplier {
    pub fn new(
        prefs: Box<dyn PreferenceStore>,
        renderer: Box<dyn ThemeRenderer>,
        images: Arc<dyn ImageService>,
        events: Sender<ThemeEvent>,
        background_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            prefs,
            renderer,
            images,
            events: EventBus::new(events),
            background_dir: background_dir.into(),
        }
    }

    pub fn active_state(&self) -> ThemeResult<ActiveThemeState> {
        ActiveThemeState::read(self.prefs.as_ref())
    }

    pub fn background_settings(&self) -> ThemeResult<BackgroundSettings> {
        ActiveThemeState::read_background(self.prefs.as_ref())
    }

    pub fn night_mode(&self) -> ThemeResult<bool> {
        Ok(self.prefs.get_bool(keys::NIGHT_MODE)?.unwrap_or(false))
    }

    /// Store the four colors and activate them as the day theme.
    ///
    /// Nothing is stored when any color fails to parse.
    pub fn activate(&mut self, colors: &ThemeColors) -> ThemeResult<AppliedTheme> {
        let parsed = colors.parse()?;
        ActiveThemeState::write_colors(self.prefs.as_mut(), parsed)?;
        self.apply_and_switch_to_day_mode()
    }

    pub fn activate_config(&mut self, config: &ThemeConfig) -> ThemeResult<AppliedTheme> {
        log::info!("Activating theme '{}'", config.theme_name);
        self.activate(&config.colors())
    }

    /// Apply the active theme, leave night mode and ask the UI to rebuild.
    pub fn apply_and_switch_to_day_mode(&mut self) -> ThemeResult<AppliedTheme> {
        let applied = self.apply_in_mode(false)?;
        self.prefs.put(keys::NIGHT_MODE, PrefValue::Bool(false))?;
        self.events.post(ThemeEvent::DefaultCoverChanged);
        self.events.post(ThemeEvent::Recreate);
        Ok(applied)
    }

    /// Commit the stored colors to the renderer.
    ///
    /// A background that is not light is replaced by white, and the
    /// replacement is stored. Alpha is dropped from every color.
    pub fn apply_active_theme(&mut self) -> ThemeResult<AppliedTheme> {
        let night_mode = self.night_mode()?;
        self.apply_in_mode(night_mode)
    }

    fn apply_in_mode(&mut self, night_mode: bool) -> ThemeResult<AppliedTheme> {
        let state = self.active_state()?;

        let mut background = state.background_or_default();
        if !background.is_light() {
            log::warn!(
                "Background {} is too dark for the day theme, using white",
                background.to_hex_rgb()
            );
            background = Color::WHITE;
            ActiveThemeState::write_color(self.prefs.as_mut(), ColorSlot::Background, background)?;
        }

        let applied = ThemeEditor::new(self.renderer.as_mut())
            .primary_color(state.primary_or_default().opaque())
            .accent_color(state.accent_or_default().opaque())
            .background_color(background.opaque())
            .bottom_background(state.bottom_background_or_default().opaque())
            .night_mode(night_mode)
            .apply()?;

        log::info!(
            "Applied theme primary={} accent={} background={} bottom={}",
            applied.primary.to_hex_rgb(),
            applied.accent.to_hex_rgb(),
            applied.background.to_hex_rgb(),
            applied.bottom_background.to_hex_rgb()
        );
        Ok(applied)
    }

    /// Save the active colors as a named theme.
    pub fn capture_as_named(
        &self,
        name: &str,
        repository: &mut ConfigRepository,
    ) -> ThemeResult<ThemeConfig> {
        let state = self.active_state()?;
        let config = ThemeConfig {
            theme_name: name.to_string(),
            primary_color: state.primary_or_default().to_hex_rgb(),
            accent_color: state.accent_or_default().to_hex_rgb(),
            background_color: state.background_or_default().to_hex_rgb(),
            bottom_background: state.bottom_background_or_default().to_hex_rgb(),
        };
        repository.upsert(config.clone())?;
        Ok(config)
    }

    /// Change one active color. Dark backgrounds are refused.
    pub fn set_color(&mut self, slot: ColorSlot, color: Color) -> ThemeResult<AppliedTheme> {
        if slot == ColorSlot::Background {
            BackgroundColorValidator.validate(&color)?;
        }
        ActiveThemeState::write_color(self.prefs.as_mut(), slot, color)?;
        self.refresh_ui()
    }

    pub fn resolve_background_image(
        &self,
        width: u32,
        height: u32,
    ) -> ThemeResult<Option<DynamicImage>> {
        let settings = self.background_settings()?;
        background::resolve(self.images.as_ref(), &settings, width, height)
    }

    /// [`resolve_background_image`](Self::resolve_background_image) on the
    /// blocking thread pool.
    pub async fn resolve_background_image_offloaded(
        &self,
        width: u32,
        height: u32,
    ) -> ThemeResult<Option<DynamicImage>> {
        let settings = self.background_settings()?;
        background::resolve_offloaded(Arc::clone(&self.images), settings, width, height).await
    }

    /// Copy `source` into the background directory and use it.
    pub fn import_background_image(&mut self, source: &Path) -> ThemeResult<PathBuf> {
        let target = import_image(source, &self.background_dir)?;
        self.prefs.put(
            keys::BG_IMAGE,
            PrefValue::Str(target.display().to_string()),
        )?;
        self.refresh_ui()?;
        Ok(target)
    }

    pub fn clear_background_image(&mut self) -> ThemeResult<()> {
        self.prefs.remove(keys::BG_IMAGE)?;
        self.refresh_ui()?;
        Ok(())
    }

    /// Store the blur level, clamped to `0..=MAX_BLUR`, and return it.
    pub fn set_background_blur(&mut self, level: u32) -> ThemeResult<u32> {
        let level = level.min(MAX_BLUR);
        self.prefs
            .put(keys::BG_IMAGE_BLURRING, PrefValue::Int(i64::from(level)))?;
        self.refresh_ui()?;
        Ok(level)
    }

    fn refresh_ui(&mut self) -> ThemeResult<AppliedTheme> {
        let applied = self.apply_active_theme()?;
        self.events.post(ThemeEvent::Recreate);
        Ok(applied)
    }
}
