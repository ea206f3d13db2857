//! Error types surfaced by the localizer core and its stores.

use thiserror::Error;

use crate::culture::Culture;
use crate::prompt::TextKey;

/// Errors raised while resolving, creating or editing prompts.
#[derive(Error, Debug)]
pub enum LocalizerError {
    /// A required argument was empty
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument {
        /// Name of the offending argument
        name: &'static str,
        /// What was wrong with it
        message: String,
    },

    /// A culture name could not be parsed
    #[error("Invalid culture name '{0}'")]
    InvalidCulture(String),

    /// Seeding was requested from a culture that has no document
    #[error("Cannot create language from '{0}': source culture does not exist in the prompt store")]
    SourceCultureMissing(Culture),

    /// An edit targeted a culture that has no document
    #[error("Culture '{0}' does not exist in the prompt store")]
    CultureMissing(Culture),

    /// An edit targeted a prompt that was never registered
    #[error("Prompt '{key}' does not exist for culture '{culture}'")]
    PromptMissing {
        /// Culture that was searched
        culture: Culture,
        /// Key that was not found
        key: TextKey,
    },

    /// A stored document belongs to a different culture than its file name says
    #[error("Document {path:?} holds culture '{found}', expected '{expected}'")]
    DocumentMismatch {
        /// File that was read
        path: std::path::PathBuf,
        /// Culture the file is named after
        expected: Culture,
        /// Culture recorded inside the document
        found: Culture,
    },

    /// The backing repository could not be read or written
    #[error("Prompt store unavailable: {0}")]
    StoreUnavailable(#[from] std::io::Error),

    /// A persisted document could not be encoded or decoded
    #[error("Failed to serialize localization document: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LocalizerError {
    /// Builds an `InvalidArgument` error for an empty required argument.
    #[must_use]
    pub fn empty_argument(name: &'static str) -> Self {
        Self::InvalidArgument { name, message: "value cannot be empty".to_string() }
    }
}
