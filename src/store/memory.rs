//! In-memory prompt store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{
    PromptCatalog,
    PromptStore,
};
use crate::context::{
    Clock,
    SystemClock,
};
use crate::culture::Culture;
use crate::error::LocalizerError;
use crate::prompt::{
    LocalizationDocument,
    TextKey,
    TextPrompt,
};
use crate::seeder::CultureSeeder;

/// Prompt store keeping every document in memory.
///
/// All mutations take the write lock, so `create_prompt` is atomic across concurrent callers.
#[derive(Debug)]
pub struct MemoryPromptStore {
    /// Culture → document
    documents: RwLock<HashMap<Culture, LocalizationDocument>>,
    /// Seeder used by `create_for_language`
    seeder: CultureSeeder,
    /// Time source for translation edits
    clock: Arc<dyn Clock>,
}

impl MemoryPromptStore {
    /// Creates an empty store using the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store using `clock` for provenance stamps.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            seeder: CultureSeeder::new(Arc::clone(&clock)),
            clock,
        }
    }

    /// Creates a store pre-populated with `documents`.
    #[must_use]
    pub fn with_documents(documents: impl IntoIterator<Item = LocalizationDocument>) -> Self {
        let store = Self::new();
        let map = documents.into_iter().map(|document| (document.culture.clone(), document)).collect();
        Self { documents: RwLock::new(map), ..store }
    }
}

impl Default for MemoryPromptStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptStore for MemoryPromptStore {
    async fn exists(&self, culture: &Culture) -> Result<bool, LocalizerError> {
        Ok(self.documents.read().await.contains_key(culture))
    }

    async fn create_for_language(
        &self,
        new_culture: &Culture,
        source_culture: &Culture,
        principal: &str,
    ) -> Result<(), LocalizerError> {
        let mut documents = self.documents.write().await;
        if documents.contains_key(new_culture) {
            return Ok(());
        }

        let document = if new_culture == source_culture {
            LocalizationDocument::new(new_culture.clone())
        } else {
            let source = documents
                .get(source_culture)
                .ok_or_else(|| LocalizerError::SourceCultureMissing(source_culture.clone()))?;
            self.seeder.clone_document(source, new_culture, principal)
        };
        tracing::info!(
            culture = %new_culture,
            source = %source_culture,
            prompts = document.len(),
            "Created language"
        );
        documents.insert(new_culture.clone(), document);

        Ok(())
    }

    async fn get_prompt(
        &self,
        culture: &Culture,
        key: &TextKey,
    ) -> Result<Option<TextPrompt>, LocalizerError> {
        let documents = self.documents.read().await;
        Ok(documents.get(culture).and_then(|document| document.prompt(key)).cloned())
    }

    async fn create_prompt(
        &self,
        culture: &Culture,
        template: TextPrompt,
        initial_text: &str,
    ) -> Result<TextPrompt, LocalizerError> {
        let mut documents = self.documents.write().await;
        let document = documents
            .entry(culture.clone())
            .or_insert_with(|| LocalizationDocument::new(culture.clone()));

        let prompt = TextPrompt { translated_text: initial_text.to_string(), ..template };
        let (stored, inserted) = document.insert_if_absent(prompt);
        tracing::debug!(%culture, key = %stored.key, inserted, "Registered prompt");

        Ok(stored)
    }
}

impl PromptCatalog for MemoryPromptStore {
    async fn cultures(&self) -> Result<Vec<Culture>, LocalizerError> {
        let mut cultures: Vec<_> = self.documents.read().await.keys().cloned().collect();
        cultures.sort();
        Ok(cultures)
    }

    async fn document(
        &self,
        culture: &Culture,
    ) -> Result<Option<LocalizationDocument>, LocalizerError> {
        Ok(self.documents.read().await.get(culture).cloned())
    }

    async fn update_translation(
        &self,
        culture: &Culture,
        key: &TextKey,
        translated_text: &str,
        principal: &str,
    ) -> Result<TextPrompt, LocalizerError> {
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(culture)
            .ok_or_else(|| LocalizerError::CultureMissing(culture.clone()))?;
        let prompt = document.prompt_mut(key).ok_or_else(|| LocalizerError::PromptMissing {
            culture: culture.clone(),
            key: key.clone(),
        })?;

        prompt.translated_text = translated_text.to_string();
        prompt.updated_at = Some(self.clock.now());
        prompt.updated_by = Some(principal.to_string());
        tracing::debug!(%culture, %key, "Updated translation");

        Ok(prompt.clone())
    }
}
