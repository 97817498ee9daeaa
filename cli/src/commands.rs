use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::renderer::TomlThemeRenderer;
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use theme_store::background::RasterImageService;
use theme_store::preferences::JsonPreferenceStore;
use theme_store::render::ThemeEvent;
use theme_store::theme::validation::{ThemeConfigValidator, ThemeNameValidator};
use theme_store::theme::{
    ColorSlot, ConfigRepository, LoadOutcome, ThemeApplier, ThemeConfig, default_themes,
};
use theme_store::{Color, ThemeError, Validator};

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Manage Folio reader themes")]
pub struct Cli {
    /// Path to a configuration file (defaults to ./folio.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List saved themes in display order
    List,
    /// Show the active theme and background settings
    Show,
    /// Add or replace a theme from its JSON form
    Add { json: String },
    /// Save the active colors under a name
    SaveAs { name: String },
    /// Delete the theme at a list position
    Delete { index: usize },
    /// Activate a saved theme by name
    Activate { name: String },
    /// Change one active color
    Set { slot: SlotArg, color: String },
    /// Re-apply the active theme
    Apply {
        /// Also leave night mode
        #[arg(long)]
        day: bool,
    },
    /// Reload the theme list from disk and merge in-memory entries
    Refresh,
    /// Background image settings
    #[command(subcommand)]
    Background(BackgroundCommand),
}

#[derive(Debug, Subcommand)]
pub enum BackgroundCommand {
    /// Import an image and use it as background
    Set { path: PathBuf },
    /// Stop using a background image
    Clear,
    /// Set the blur level
    Blur { level: u32 },
    /// Render the background at a size into an image file
    Preview {
        width: u32,
        height: u32,
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SlotArg {
    Primary,
    Accent,
    Background,
    Bottom,
}

impl From<SlotArg> for ColorSlot {
    fn from(slot: SlotArg) -> Self {
        match slot {
            SlotArg::Primary => ColorSlot::Primary,
            SlotArg::Accent => ColorSlot::Accent,
            SlotArg::Background => ColorSlot::Background,
            SlotArg::Bottom => ColorSlot::BottomBackground,
        }
    }
}

/// Repository and applier wired to the configured files.
pub struct ThemeSession {
    repository: ConfigRepository,
    applier: ThemeApplier,
    events: Receiver<ThemeEvent>,
}

impl ThemeSession {
    pub fn open(config: &AppConfig) -> AppResult<Self> {
        let repository = ConfigRepository::init(config.theme_file(), default_themes());
        if let LoadOutcome::Corrupt(reason) = repository.load_outcome() {
            log::warn!(
                "Using bundled themes, {} could not be read: {}",
                repository.path().display(),
                reason
            );
        }

        let (tx, events) = mpsc::channel();
        let applier = ThemeApplier::new(
            Box::new(JsonPreferenceStore::open(config.preferences_file())),
            Box::new(TomlThemeRenderer::new(config.applied_theme_file())),
            Arc::new(RasterImageService),
            tx,
            config.background_dir(),
        );

        Ok(Self {
            repository,
            applier,
            events,
        })
    }

    pub fn repository(&self) -> &ConfigRepository {
        &self.repository
    }

    /// Events emitted since the last call.
    pub fn drain_events(&self) -> Vec<ThemeEvent> {
        self.events.try_iter().collect()
    }

    /// Run one command and return the text to print.
    pub async fn execute(&mut self, command: Command) -> AppResult<String> {
        match command {
            Command::List => Ok(self.list()),
            Command::Show => self.show(),
            Command::Add { json } => self.add(&json),
            Command::SaveAs { name } => {
                let name = ThemeNameValidator.accept(name.as_str())?;
                let saved = self.applier.capture_as_named(name, &mut self.repository)?;
                Ok(format!("Saved theme '{}'", saved.theme_name))
            }
            Command::Delete { index } => {
                let removed = self.repository.delete(index)?;
                Ok(format!("Deleted theme '{}'", removed.theme_name))
            }
            Command::Activate { name } => {
                let config = self
                    .repository
                    .find(&name)
                    .cloned()
                    .ok_or_else(|| AppError::NotFound(name.clone()))?;
                self.applier.activate_config(&config)?;
                Ok(format!("Activated theme '{name}'"))
            }
            Command::Set { slot, color } => {
                let color = Color::parse(&color)?;
                let applied = self.applier.set_color(slot.into(), color)?;
                Ok(format!(
                    "Applied primary={} accent={} background={} bottom={}",
                    applied.primary.to_hex_rgb(),
                    applied.accent.to_hex_rgb(),
                    applied.background.to_hex_rgb(),
                    applied.bottom_background.to_hex_rgb()
                ))
            }
            Command::Apply { day } => {
                if day {
                    self.applier.apply_and_switch_to_day_mode()?;
                    Ok("Applied active theme in day mode".to_string())
                } else {
                    self.applier.apply_active_theme()?;
                    Ok("Applied active theme".to_string())
                }
            }
            Command::Refresh => {
                self.repository.refresh()?;
                Ok(format!("{} themes", self.repository.len()))
            }
            Command::Background(command) => self.background(command).await,
        }
    }

    fn list(&self) -> String {
        let mut out = String::new();
        for (index, theme) in self.repository.list().iter().enumerate() {
            let _ = writeln!(
                out,
                "{index:>3}  {:<20} {} {} {} {}",
                theme.theme_name,
                theme.primary_color,
                theme.accent_color,
                theme.background_color,
                theme.bottom_background
            );
        }
        out
    }

    fn show(&self) -> AppResult<String> {
        let state = self.applier.active_state()?;
        let mut out = String::new();
        let _ = writeln!(out, "primary            {}", state.primary_or_default().to_hex_rgb());
        let _ = writeln!(out, "accent             {}", state.accent_or_default().to_hex_rgb());
        let _ = writeln!(out, "background         {}", state.background_or_default().to_hex_rgb());
        let _ = writeln!(
            out,
            "bottom background  {}",
            state.bottom_background_or_default().to_hex_rgb()
        );
        let _ = writeln!(
            out,
            "background image   {}",
            state.background_image.as_deref().unwrap_or("none")
        );
        let _ = writeln!(out, "background blur    {}", state.background_blur);
        let _ = writeln!(out, "night mode         {}", self.applier.night_mode()?);
        Ok(out)
    }

    fn add(&mut self, json: &str) -> AppResult<String> {
        let config: ThemeConfig = serde_json::from_str(json.trim_matches(|c: char| c < ' '))
            .map_err(|e| AppError::Validation(format!("Not a theme configuration: {e}")))?;
        ThemeConfigValidator.validate(&config)?;

        let name = config.theme_name.clone();
        self.repository.upsert(config)?;
        Ok(format!("Saved theme '{name}'"))
    }

    async fn background(&mut self, command: BackgroundCommand) -> AppResult<String> {
        match command {
            BackgroundCommand::Set { path } => {
                let stored = self.applier.import_background_image(&path)?;
                Ok(format!("Background image stored at {}", stored.display()))
            }
            BackgroundCommand::Clear => {
                self.applier.clear_background_image()?;
                Ok("Background image cleared".to_string())
            }
            BackgroundCommand::Blur { level } => {
                let level = self.applier.set_background_blur(level)?;
                Ok(format!("Background blur set to {level}"))
            }
            BackgroundCommand::Preview {
                width,
                height,
                output,
            } => {
                let image = self
                    .applier
                    .resolve_background_image_offloaded(width, height)
                    .await?;
                match image {
                    Some(image) => {
                        image.save(&output).map_err(ThemeError::from)?;
                        Ok(format!("Preview written to {}", output.display()))
                    }
                    None => Ok("No background image set".to_string()),
                }
            }
        }
    }
}
