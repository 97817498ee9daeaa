use thiserror::Error;

/// Errors produced by the theme store.
///
/// The variants follow where a failure is detected and who is expected to
/// handle it:
///
/// ## Recovered inside the store
/// - [`PersistedDataCorrupt`] - the theme list file exists but cannot be parsed.
///   [`ConfigRepository::init`](crate::theme::ConfigRepository::init) replaces the
///   list with the bundled defaults and records the reason; it is never returned
///   from a public operation.
///
/// ## Reported to the caller
/// - [`ConfigParse`] - a single theme configuration supplied as JSON is invalid
/// - [`ColorParse`] - a stored or supplied color string is not a color
/// - [`BackgroundTooDark`] - a background edit would make the day theme unreadable
/// - [`IndexOutOfRange`] - `delete` was called with a position outside the list
///
/// ## Infrastructure
/// - [`Io`], [`Serialize`], [`Preference`], [`Image`], [`Render`]
///
/// # Examples
///
/// ```no_run
/// use theme_store::error::ThemeError;
///
/// fn describe(error: &ThemeError) -> &'static str {
///     match error {
///         ThemeError::ColorParse { .. } => "Please enter a color such as #FFEEDD",
///         ThemeError::BackgroundTooDark { .. } => "The day background is too dark",
///         _ => "Theme operation failed",
///     }
/// }
/// ```
///
/// [`PersistedDataCorrupt`]: ThemeError::PersistedDataCorrupt
/// [`ConfigParse`]: ThemeError::ConfigParse
/// [`ColorParse`]: ThemeError::ColorParse
/// [`BackgroundTooDark`]: ThemeError::BackgroundTooDark
/// [`IndexOutOfRange`]: ThemeError::IndexOutOfRange
/// [`Io`]: ThemeError::Io
/// [`Serialize`]: ThemeError::Serialize
/// [`Preference`]: ThemeError::Preference
/// [`Image`]: ThemeError::Image
/// [`Render`]: ThemeError::Render
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Theme list at '{path}' is corrupt: {reason}")]
    PersistedDataCorrupt { path: String, reason: String },

    #[error("Invalid theme configuration: {0}")]
    ConfigParse(String),

    #[error("Invalid color '{value}'")]
    ColorParse { value: String },

    #[error("Background color {color} is too dark for the day theme")]
    BackgroundTooDark { color: String },

    #[error("Theme index {index} is out of range (list has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Preference '{key}' could not be used: {reason}")]
    Preference { key: String, reason: String },

    #[error("Image error: {0}")]
    Image(String),

    #[error("Rendering service rejected the theme: {0}")]
    Render(String),
}

impl ThemeError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        ThemeError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

impl From<image::ImageError> for ThemeError {
    fn from(err: image::ImageError) -> Self {
        ThemeError::Image(err.to_string())
    }
}

/// Result type alias for theme store operations
pub type ThemeResult<T> = Result<T, ThemeError>;
