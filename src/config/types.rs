use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::culture::Culture;
use crate::key::DEFAULT_ACTION_NAME;

/// Placeholder replaced by the source text in `fallbackFormat`.
pub const TEXT_PLACEHOLDER: &str = "{text}";

/// Placeholder replaced by the culture name in `fallbackFormat`.
pub const CULTURE_PLACEHOLDER: &str = "{culture}";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "store.directory")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizerSettings {
    /// Culture whose prompts show the source text unchanged and which seeds new languages.
    pub default_culture: Culture,

    /// Substituted when a view does not name its action.
    pub default_action_name: String,

    /// Shown for prompts without a translation outside the default culture.
    /// Must contain `{text}` and `{culture}`.
    pub fallback_format: String,

    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Directory of the JSON file store, relative to the project root.
    pub directory: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { directory: PathBuf::from("localization") }
    }
}

impl LocalizerSettings {
    /// # Errors
    /// - Required field is empty
    /// - Fallback format without placeholders
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.default_action_name.trim().is_empty() {
            errors.push(ValidationError::new(
                "defaultActionName",
                "The action name cannot be empty. Example: \"Index\"",
            ));
        }

        for placeholder in [TEXT_PLACEHOLDER, CULTURE_PLACEHOLDER] {
            if !self.fallback_format.contains(placeholder) {
                errors.push(ValidationError::new(
                    "fallbackFormat",
                    format!(
                        "The format must contain '{placeholder}'. Example: \"{{culture}}:[{{text}}]\""
                    ),
                ));
            }
        }

        if self.store.directory.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "store.directory",
                "The directory cannot be empty. Example: \"localization\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for LocalizerSettings {
    fn default() -> Self {
        Self {
            default_culture: Culture::default(),
            default_action_name: DEFAULT_ACTION_NAME.to_string(),
            fallback_format: format!("{CULTURE_PLACEHOLDER}:[{TEXT_PLACEHOLDER}]"),
            store: StoreConfig::default(),
        }
    }
}

/// Values given on the command line that take precedence over the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub default_culture: Option<Culture>,
    pub fallback_format: Option<String>,
    pub store_directory: Option<PathBuf>,
}

impl SettingsOverrides {
    /// Whether no value is overridden.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.default_culture.is_none()
            && self.fallback_format.is_none()
            && self.store_directory.is_none()
    }

    /// Returns `settings` with every overridden value replaced.
    #[must_use]
    pub fn apply_to(self, settings: &LocalizerSettings) -> LocalizerSettings {
        LocalizerSettings {
            default_culture: self.default_culture.unwrap_or_else(|| settings.default_culture.clone()),
            default_action_name: settings.default_action_name.clone(),
            fallback_format: self.fallback_format.unwrap_or_else(|| settings.fallback_format.clone()),
            store: StoreConfig {
                directory: self.store_directory.unwrap_or_else(|| settings.store.directory.clone()),
            },
        }
    }
}
