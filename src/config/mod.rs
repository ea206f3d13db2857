//! Localizer configuration.
mod loader;
mod manager;
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::{
    ConfigManager,
    load_from,
    load_from_file,
};
pub use types::{
    CULTURE_PLACEHOLDER,
    ConfigError,
    LocalizerSettings,
    SettingsOverrides,
    StoreConfig,
    TEXT_PLACEHOLDER,
    ValidationError,
};
