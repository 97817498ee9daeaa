use crate::color::Color;
use crate::error::ThemeResult;
use std::sync::mpsc::Sender;

/// The resolved theme handed to the rendering service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedTheme {
    pub primary: Color,
    pub accent: Color,
    pub background: Color,
    pub bottom_background: Color,
    pub night_mode: bool,
}

/// Rendering service that composes the UI from the committed theme.
pub trait ThemeRenderer: Send {
    /// Atomically replace the theme used for subsequent composition.
    fn commit(&mut self, theme: &AppliedTheme) -> ThemeResult<()>;
}

/// Builder for a theme edit, committed by [`ThemeEditor::apply`].
///
/// Colors that are not set keep the renderer's defaults (white backgrounds,
/// black accent).
pub struct ThemeEditor<'a> {
    renderer: &'a mut dyn ThemeRenderer,
    theme: AppliedTheme,
}

impl<'a> ThemeEditor<'a> {
    pub fn new(renderer: &'a mut dyn ThemeRenderer) -> Self {
        Self {
            renderer,
            theme: AppliedTheme {
                primary: Color::WHITE,
                accent: Color::BLACK,
                background: Color::WHITE,
                bottom_background: Color::WHITE,
                night_mode: false,
            },
        }
    }

    pub fn primary_color(mut self, color: Color) -> Self {
        self.theme.primary = color;
        self
    }

    pub fn accent_color(mut self, color: Color) -> Self {
        self.theme.accent = color;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.theme.background = color;
        self
    }

    pub fn bottom_background(mut self, color: Color) -> Self {
        self.theme.bottom_background = color;
        self
    }

    pub fn night_mode(mut self, night: bool) -> Self {
        self.theme.night_mode = night;
        self
    }

    pub fn apply(self) -> ThemeResult<AppliedTheme> {
        self.renderer.commit(&self.theme)?;
        Ok(self.theme)
    }
}

/// Signals broadcast to the UI after the theme changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeEvent {
    /// Every UI surface should be rebuilt with the new theme.
    Recreate,
    /// Assets derived from the day/night mode (the default cover) are stale.
    DefaultCoverChanged,
}

/// Fire-and-forget event publisher.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: Sender<ThemeEvent>,
}

impl EventBus {
    pub fn new(tx: Sender<ThemeEvent>) -> Self {
        Self { tx }
    }

    pub fn post(&self, event: ThemeEvent) {
        if let Err(e) = self.tx.send(event) {
            log::warn!("Dropped theme event {:?}: receiver is gone", e.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[derive(Default)]
    struct Recorder(Vec<AppliedTheme>);

    impl ThemeRenderer for Recorder {
        fn commit(&mut self, theme: &AppliedTheme) -> ThemeResult<()> {
            self.0.push(*theme);
            Ok(())
        }
    }

    #[test]
    fn test_editor_commits_once_with_all_colors() {
        let mut recorder = Recorder::default();
        let red = Color::from_rgb(0xFF, 0, 0);

        let applied = ThemeEditor::new(&mut recorder)
            .primary_color(red)
            .accent_color(Color::WHITE)
            .background_color(Color::WHITE)
            .bottom_background(Color::BLACK)
            .apply()
            .unwrap();

        assert_eq!(recorder.0, vec![applied]);
        assert_eq!(applied.primary, red);
        assert_eq!(applied.bottom_background, Color::BLACK);
        assert!(!applied.night_mode);
    }

    #[test]
    fn test_event_bus_survives_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        let bus = EventBus::new(tx);

        bus.post(ThemeEvent::Recreate);
        assert_eq!(rx.recv().unwrap(), ThemeEvent::Recreate);

        drop(rx);
        bus.post(ThemeEvent::Recreate);
    }
}
