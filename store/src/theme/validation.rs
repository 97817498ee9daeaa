use crate::color::Color;
use crate::error::ThemeError;
use crate::theme::types::ThemeConfig;
use crate::validation::Validator;

/// Longest accepted theme name, in characters.
pub const MAX_THEME_NAME_LEN: usize = 50;

/// Validation errors for user-supplied theme input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeValidationError {
    InvalidThemeName { name: String, reason: String },
    InvalidColor { field: String, value: String },
    BackgroundTooDark { value: String },
}

impl ThemeValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ThemeValidationError::InvalidThemeName { name, reason } => {
                format!(
                    "Invalid theme name: '{}'\n\n\
                    Reason: {}\n\n\
                    Please use a short, visible name without leading or trailing spaces.",
                    name, reason
                )
            }
            ThemeValidationError::InvalidColor { field, value } => {
                format!(
                    "Invalid color for {}: '{}'\n\n\
                    Please use #RRGGBB, #AARRGGBB or a basic color name.",
                    field, value
                )
            }
            ThemeValidationError::BackgroundTooDark { value } => {
                format!(
                    "Background color '{}' is too dark for the day theme.\n\n\
                    Please pick a lighter background.",
                    value
                )
            }
        }
    }
}

impl From<ThemeValidationError> for ThemeError {
    fn from(error: ThemeValidationError) -> Self {
        match error {
            ThemeValidationError::InvalidColor { value, .. } => ThemeError::ColorParse { value },
            ThemeValidationError::BackgroundTooDark { value } => {
                ThemeError::BackgroundTooDark { color: value }
            }
            other => ThemeError::ConfigParse(other.user_message()),
        }
    }
}

/// Validator for theme names entered by the user
pub struct ThemeNameValidator;

impl Validator<str> for ThemeNameValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        let invalid = |reason: &str| ThemeValidationError::InvalidThemeName {
            name: input.to_string(),
            reason: reason.to_string(),
        };

        if input.trim().is_empty() {
            return Err(invalid("Name cannot be empty"));
        }

        if input.chars().count() > MAX_THEME_NAME_LEN {
            return Err(invalid("Name too long (max 50 characters)"));
        }

        if input.chars().any(char::is_control) {
            return Err(invalid("Name contains control characters"));
        }

        if input.trim() != input {
            return Err(invalid("Name cannot start or end with whitespace"));
        }

        Ok(())
    }
}

/// Validator for a single color string
pub struct ColorValidator {
    pub field: &'static str,
}

impl Validator<str> for ColorValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        Color::parse(input)
            .map(|_| ())
            .map_err(|_| ThemeValidationError::InvalidColor {
                field: self.field.to_string(),
                value: input.to_string(),
            })
    }
}

/// Rejects backgrounds that are too dark to read on
pub struct BackgroundColorValidator;

impl Validator<Color> for BackgroundColorValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &Color) -> Result<(), Self::Error> {
        if input.is_light() {
            Ok(())
        } else {
            Err(ThemeValidationError::BackgroundTooDark {
                value: input.to_hex_rgb(),
            })
        }
    }
}

/// Validator for complete theme configurations
pub struct ThemeConfigValidator;

impl Validator<ThemeConfig> for ThemeConfigValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &ThemeConfig) -> Result<(), Self::Error> {
        ThemeNameValidator.validate(&input.theme_name)?;

        let fields = [
            ("primaryColor", &input.primary_color),
            ("accentColor", &input.accent_color),
            ("backgroundColor", &input.background_color),
            ("bottomBackground", &input.bottom_background),
        ];
        for (field, value) in fields {
            ColorValidator { field }.validate(value)?;
        }

        Ok(())
    }
}
