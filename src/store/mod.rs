//! Prompt repositories.
//!
//! [`PromptStore`] is everything the translator needs from a backend. [`PromptCatalog`] adds the
//! listing and editing operations used by translators filling in prompts.

mod file;
mod memory;

use std::future::Future;

pub use file::JsonFilePromptStore;
pub use memory::MemoryPromptStore;

use crate::culture::Culture;
use crate::error::LocalizerError;
use crate::prompt::{
    LocalizationDocument,
    TextKey,
    TextPrompt,
};

/// Per-culture prompt repository consumed by the translator.
pub trait PromptStore: Send + Sync {
    /// Whether a document exists for `culture`.
    fn exists(&self, culture: &Culture) -> impl Future<Output = Result<bool, LocalizerError>> + Send;

    /// Creates the document for `new_culture` by seeding it from `source_culture`.
    ///
    /// Does nothing when `new_culture` already exists. When both cultures are the same an empty
    /// document is created, since there is nothing to seed from.
    ///
    /// # Errors
    /// `SourceCultureMissing` when `source_culture` has no document.
    fn create_for_language(
        &self,
        new_culture: &Culture,
        source_culture: &Culture,
        principal: &str,
    ) -> impl Future<Output = Result<(), LocalizerError>> + Send;

    /// Looks up a prompt. `None` means the prompt was never registered.
    fn get_prompt(
        &self,
        culture: &Culture,
        key: &TextKey,
    ) -> impl Future<Output = Result<Option<TextPrompt>, LocalizerError>> + Send;

    /// Registers `template` with `initial_text` as its translation.
    ///
    /// Upsert keyed by `template.key`: when the key is already registered the stored prompt is
    /// returned unchanged.
    fn create_prompt(
        &self,
        culture: &Culture,
        template: TextPrompt,
        initial_text: &str,
    ) -> impl Future<Output = Result<TextPrompt, LocalizerError>> + Send;
}

/// Listing and editing of stored prompts.
pub trait PromptCatalog: PromptStore {
    /// All cultures with a document, sorted by name.
    fn cultures(&self) -> impl Future<Output = Result<Vec<Culture>, LocalizerError>> + Send;

    /// The whole document of `culture`.
    fn document(
        &self,
        culture: &Culture,
    ) -> impl Future<Output = Result<Option<LocalizationDocument>, LocalizerError>> + Send;

    /// Sets the translation of a registered prompt, stamping provenance.
    ///
    /// # Errors
    /// `CultureMissing` or `PromptMissing` when there is nothing to edit.
    fn update_translation(
        &self,
        culture: &Culture,
        key: &TextKey,
        translated_text: &str,
        principal: &str,
    ) -> impl Future<Output = Result<TextPrompt, LocalizerError>> + Send;
}
