//! Prompt data model: text keys, prompts and per-culture documents.

use std::fmt;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::culture::Culture;

/// Stable identifier of a prompt, derived from controller, action and source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextKey(String);

impl TextKey {
    /// Wraps an already computed key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single translatable text tied to the view it appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPrompt {
    pub key: TextKey,
    pub controller_name: String,
    pub action_name: String,
    /// Text as written in the view.
    pub source_text: String,
    /// Empty until a translator supplies a translation.
    #[serde(default)]
    pub translated_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl TextPrompt {
    /// Creates an untranslated prompt with no provenance.
    #[must_use]
    pub fn template(
        key: TextKey,
        controller_name: impl Into<String>,
        action_name: impl Into<String>,
        source_text: impl Into<String>,
    ) -> Self {
        Self {
            key,
            controller_name: controller_name.into(),
            action_name: action_name.into(),
            source_text: source_text.into(),
            translated_text: String::new(),
            updated_at: None,
            updated_by: None,
        }
    }

    /// Whether a translator has supplied text for this prompt.
    #[must_use]
    pub fn is_translated(&self) -> bool {
        !self.translated_text.is_empty()
    }
}

/// All prompts of one culture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizationDocument {
    /// Persisted identifier (the culture display name, e.g. `fr-FR`).
    pub id: String,
    pub culture: Culture,
    /// Prompts in insertion order. Keys are unique.
    #[serde(default)]
    pub prompts: Vec<TextPrompt>,
}

impl LocalizationDocument {
    /// Creates an empty document for `culture`.
    #[must_use]
    pub fn new(culture: Culture) -> Self {
        Self { id: culture.name().to_string(), culture, prompts: Vec::new() }
    }

    /// Looks up a prompt by key.
    #[must_use]
    pub fn prompt(&self, key: &TextKey) -> Option<&TextPrompt> {
        self.prompts.iter().find(|prompt| &prompt.key == key)
    }

    /// Mutable lookup by key.
    pub fn prompt_mut(&mut self, key: &TextKey) -> Option<&mut TextPrompt> {
        self.prompts.iter_mut().find(|prompt| &prompt.key == key)
    }

    /// Inserts `prompt` unless its key is already registered.
    ///
    /// Returns the prompt stored under the key afterwards and whether it was inserted.
    pub fn insert_if_absent(&mut self, prompt: TextPrompt) -> (TextPrompt, bool) {
        if let Some(existing) = self.prompt(&prompt.key) {
            return (existing.clone(), false);
        }
        self.prompts.push(prompt.clone());
        (prompt, true)
    }

    /// Prompts still waiting for a translation.
    pub fn untranslated(&self) -> impl Iterator<Item = &TextPrompt> {
        self.prompts.iter().filter(|prompt| !prompt.is_translated())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    fn prompt(key: &str, translated: &str) -> TextPrompt {
        TextPrompt {
            translated_text: translated.to_string(),
            ..TextPrompt::template(TextKey::new(key), "Home", "Index", key)
        }
    }

    fn culture(name: &str) -> Culture {
        Culture::new(name).unwrap()
    }

    #[rstest]
    fn new_document_uses_culture_name_as_id() {
        let document = LocalizationDocument::new(culture("fr_fr"));

        assert_that!(document.id, eq("fr-FR"));
        assert_that!(document.is_empty(), eq(true));
    }

    #[rstest]
    fn insert_if_absent_keeps_existing_prompt() {
        let mut document = LocalizationDocument::new(culture("sv-SE"));
        document.insert_if_absent(prompt("hello", "Hej"));

        let (stored, inserted) = document.insert_if_absent(prompt("hello", ""));

        assert_that!(inserted, eq(false));
        assert_that!(stored.translated_text, eq("Hej"));
        assert_that!(document.len(), eq(1));
    }

    #[rstest]
    fn insert_if_absent_appends_new_keys_in_order() {
        let mut document = LocalizationDocument::new(culture("sv-SE"));

        let (_, first) = document.insert_if_absent(prompt("a", ""));
        let (_, second) = document.insert_if_absent(prompt("b", ""));

        assert_that!(first, eq(true));
        assert_that!(second, eq(true));
        assert_that!(
            document.prompts,
            elements_are![
                field!(TextPrompt.key, eq(&TextKey::new("a"))),
                field!(TextPrompt.key, eq(&TextKey::new("b")))
            ]
        );
    }

    #[rstest]
    fn untranslated_lists_only_empty_prompts() {
        let mut document = LocalizationDocument::new(culture("de-DE"));
        document.insert_if_absent(prompt("done", "Fertig"));
        document.insert_if_absent(prompt("todo", ""));

        let keys: Vec<_> = document.untranslated().map(|p| p.key.as_str()).collect();

        assert_that!(keys, elements_are![eq(&"todo")]);
    }

    #[rstest]
    fn deserialize_camel_case_document() {
        let json = r#"{
            "id": "fr-FR",
            "culture": "fr-fr",
            "prompts": [
                {"key": "k1", "controllerName": "Home", "actionName": "Index", "sourceText": "Hello"}
            ]
        }"#;

        let document: LocalizationDocument = serde_json::from_str(json).unwrap();

        assert_eq!(document.culture, culture("fr-FR"));
        assert_that!(document.prompts[0].translated_text, eq(""));
        assert_that!(document.prompts[0].updated_by, none());
        assert_that!(document.prompt(&TextKey::new("k1")).is_some(), eq(true));
    }
}
