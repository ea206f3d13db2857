//! JSON file prompt store.

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use tokio::sync::Mutex;

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

/// Extension of document files
const DOCUMENT_EXTENSION: &str = "json";

/// Stores one `<culture>.json` document per culture in a directory.
///
/// Mutations are serialised through an in-process lock and written via a temporary file that is
/// renamed over the document, so readers never observe a half-written file.
#[derive(Debug)]
pub struct JsonFilePromptStore {
    /// Directory holding the documents
    directory: PathBuf,
    /// Serialises read-modify-write cycles
    write_lock: Mutex<()>,
    /// Seeder used by `create_for_language`
    seeder: CultureSeeder,
    /// Time source for translation edits
    clock: Arc<dyn Clock>,
}

impl JsonFilePromptStore {
    /// Opens a store rooted at `directory`. The directory is created on first write.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_clock(directory, Arc::new(SystemClock))
    }

    /// Opens a store using `clock` for provenance stamps.
    #[must_use]
    pub fn with_clock(directory: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            directory: directory.into(),
            write_lock: Mutex::new(()),
            seeder: CultureSeeder::new(Arc::clone(&clock)),
            clock,
        }
    }

    /// Directory holding the documents.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the document file for `culture`.
    #[must_use]
    pub fn document_path(&self, culture: &Culture) -> PathBuf {
        self.directory.join(format!("{}.{DOCUMENT_EXTENSION}", culture.name()))
    }

    /// Reads the document of `culture`, `None` when its file does not exist.
    async fn load(&self, culture: &Culture) -> Result<Option<LocalizationDocument>, LocalizerError> {
        let path = self.document_path(culture);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        let document: LocalizationDocument = serde_json::from_str(&content)?;
        if &document.culture != culture {
            return Err(LocalizerError::DocumentMismatch {
                path,
                expected: culture.clone(),
                found: document.culture,
            });
        }

        tracing::debug!("Loaded localization document: {:?}", path);
        Ok(Some(document))
    }

    /// Writes `document` to the file of `culture`.
    async fn save(
        &self,
        culture: &Culture,
        document: &LocalizationDocument,
    ) -> Result<(), LocalizerError> {
        tokio::fs::create_dir_all(&self.directory).await?;

        let path = self.document_path(culture);
        let temp_path = path.with_extension(format!("{DOCUMENT_EXTENSION}.tmp"));
        let content = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&temp_path, content).await?;
        tokio::fs::rename(&temp_path, &path).await?;

        tracing::debug!("Saved localization document: {:?}", path);
        Ok(())
    }
}

impl PromptStore for JsonFilePromptStore {
    async fn exists(&self, culture: &Culture) -> Result<bool, LocalizerError> {
        Ok(tokio::fs::try_exists(self.document_path(culture)).await?)
    }

    async fn create_for_language(
        &self,
        new_culture: &Culture,
        source_culture: &Culture,
        principal: &str,
    ) -> Result<(), LocalizerError> {
        let _guard = self.write_lock.lock().await;
        if self.exists(new_culture).await? {
            return Ok(());
        }

        let document = if new_culture == source_culture {
            LocalizationDocument::new(new_culture.clone())
        } else {
            let source = self
                .load(source_culture)
                .await?
                .ok_or_else(|| LocalizerError::SourceCultureMissing(source_culture.clone()))?;
            self.seeder.clone_document(&source, new_culture, principal)
        };
        self.save(new_culture, &document).await?;
        tracing::info!(
            culture = %new_culture,
            source = %source_culture,
            prompts = document.len(),
            "Created language"
        );

        Ok(())
    }

    async fn get_prompt(
        &self,
        culture: &Culture,
        key: &TextKey,
    ) -> Result<Option<TextPrompt>, LocalizerError> {
        let document = self.load(culture).await?;
        Ok(document.and_then(|document| document.prompt(key).cloned()))
    }

    async fn create_prompt(
        &self,
        culture: &Culture,
        template: TextPrompt,
        initial_text: &str,
    ) -> Result<TextPrompt, LocalizerError> {
        let _guard = self.write_lock.lock().await;
        let mut document =
            self.load(culture).await?.unwrap_or_else(|| LocalizationDocument::new(culture.clone()));

        let prompt = TextPrompt { translated_text: initial_text.to_string(), ..template };
        let (stored, inserted) = document.insert_if_absent(prompt);
        if inserted {
            self.save(culture, &document).await?;
        }
        tracing::debug!(%culture, key = %stored.key, inserted, "Registered prompt");

        Ok(stored)
    }
}

impl PromptCatalog for JsonFilePromptStore {
    async fn cultures(&self) -> Result<Vec<Culture>, LocalizerError> {
        let mut entries = match tokio::fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        let mut cultures = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match Culture::new(stem) {
                Ok(culture) => cultures.push(culture),
                Err(error) => tracing::warn!("Skipping {:?}: {}", path, error),
            }
        }
        cultures.sort();

        Ok(cultures)
    }

    async fn document(
        &self,
        culture: &Culture,
    ) -> Result<Option<LocalizationDocument>, LocalizerError> {
        self.load(culture).await
    }

    async fn update_translation(
        &self,
        culture: &Culture,
        key: &TextKey,
        translated_text: &str,
        principal: &str,
    ) -> Result<TextPrompt, LocalizerError> {
        let _guard = self.write_lock.lock().await;
        let mut document =
            self.load(culture).await?.ok_or_else(|| LocalizerError::CultureMissing(culture.clone()))?;
        let prompt = document.prompt_mut(key).ok_or_else(|| LocalizerError::PromptMissing {
            culture: culture.clone(),
            key: key.clone(),
        })?;

        prompt.translated_text = translated_text.to_string();
        prompt.updated_at = Some(self.clock.now());
        prompt.updated_by = Some(principal.to_string());
        let updated = prompt.clone();
        self.save(culture, &document).await?;
        tracing::debug!(%culture, %key, "Updated translation");

        Ok(updated)
    }
}
