use theme_store::ThemeError;
use theme_store::theme::validation::ThemeValidationError;
use thiserror::Error;

/// Application-wide error types for the Folio command line.
///
/// # Error Categories
///
/// - [`Theme`] - failures reported by the theme store
/// - [`Validation`] - user input that was rejected before reaching the store
/// - [`NotFound`] - a named theme does not exist
/// - [`Config`] - configuration loading and validation errors
///
/// [`Theme`]: AppError::Theme
/// [`Validation`]: AppError::Validation
/// [`NotFound`]: AppError::NotFound
/// [`Config`]: AppError::Config
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Theme store operation failures.
    ///
    /// Carries the rendered [`ThemeError`]; corrupt theme lists never end up
    /// here because the store recovers from them.
    #[error("Theme Error: {0}")]
    Theme(String),

    /// Rejected user input, with a message meant for the user.
    #[error("Invalid Input: {0}")]
    Validation(String),

    /// A theme name that is not in the saved list.
    #[error("Theme not found: {0}")]
    NotFound(String),

    /// Configuration loading and validation errors.
    ///
    /// Returned before any command runs; `main` exits with the message.
    /// Check the `folio.toml` file and `FOLIO__*` environment variables.
    #[error("Configuration Error: {0}")]
    Config(String),
}

impl From<ThemeError> for AppError {
    fn from(err: ThemeError) -> Self {
        match err {
            ThemeError::ColorParse { .. } | ThemeError::BackgroundTooDark { .. } => {
                AppError::Validation(err.to_string())
            }
            other => AppError::Theme(other.to_string()),
        }
    }
}

impl From<ThemeValidationError> for AppError {
    fn from(err: ThemeValidationError) -> Self {
        AppError::Validation(err.user_message())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
