//! # Folio
//!
//! Command-line front end for the Folio theme store: lists, edits and
//! activates reading themes, and publishes the applied theme as a TOML file
//! for the reader UI.

pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod renderer;
