//! # Folio Theme Store
//!
//! Core library for the reading themes of the Folio reader: the saved theme
//! list, activation of a theme as the runtime theme, and the background image
//! settings that go with it.
//!
//! ## Modules
//!
//! - [`theme`] - Theme list repository, activation and validation
//! - [`color`] - ARGB colors, hex parsing and the light-color check
//! - [`preferences`] - Key/value storage for the active selection
//! - [`render`] - Rendering service seam and UI events
//! - [`background`] - Background image decoding, blur and import
//! - [`persist`] - Atomic file replacement
//! - [`validation`] - Validator trait
//! - [`error`] - Error types

pub mod background;
pub mod color;
pub mod error;
pub mod persist;
pub mod preferences;
pub mod render;
pub mod theme;
pub mod validation;

pub use color::Color;
pub use error::{ThemeError, ThemeResult};
pub use validation::Validator;
