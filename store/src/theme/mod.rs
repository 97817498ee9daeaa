//! # Theme Store Module
//!
//! Saved reading themes and the activation of one of them as the live theme.
//!
//! ## Architecture
//!
//! - **[`ConfigRepository`]** - ordered, name-unique list of [`ThemeConfig`]
//!   entries persisted as a JSON array
//! - **[`ThemeApplier`]** - reads the active selection from the preference
//!   store and commits it to the rendering service
//! - **[`ActiveThemeState`]** - the active colors and background image settings
//! - **Theme Validation** - checks for names and colors entered by users
//!
//! ## Basic Usage
//!
//! ```no_run
//! use std::sync::{Arc, mpsc};
//! use theme_store::background::RasterImageService;
//! use theme_store::preferences::JsonPreferenceStore;
//! use theme_store::theme::{ConfigRepository, ThemeApplier};
//!
//! let data_dir = std::path::Path::new("/var/lib/folio");
//! let mut repository = ConfigRepository::init_in_dir(data_dir);
//!
//! let (tx, rx) = mpsc::channel();
//! let mut applier = ThemeApplier::new(
//!     Box::new(JsonPreferenceStore::open(data_dir.join("preferences.json"))),
//!     Box::new(my_renderer),
//!     Arc::new(RasterImageService),
//!     tx,
//!     data_dir.join("bgImage"),
//! );
//!
//! let sepia = repository.find("Sepia").cloned().unwrap();
//! applier.activate_config(&sepia)?;
//! applier.capture_as_named("My Sepia", &mut repository)?;
//! ```
//!
//! ## Error Handling and Fallbacks
//!
//! - **Missing or corrupt theme list** - the bundled presets are used and the
//!   reason is available from [`ConfigRepository::load_outcome`]
//! - **Dark day background** - reset to white during activation
//! - **Invalid colors** - reported to the caller as
//!   [`ThemeError::ColorParse`](crate::error::ThemeError::ColorParse)

pub mod applier;
pub mod defaults;
pub mod repository;
pub mod state;
pub mod types;
pub mod validation;

pub use applier::ThemeApplier;
pub use defaults::default_themes;
pub use repository::{CONFIG_FILE_NAME, ConfigRepository};
pub use state::ActiveThemeState;
pub use types::{ColorSlot, LoadOutcome, ThemeColors, ThemeConfig};
