//! Seeding of new cultures from an existing document.

use std::sync::Arc;

use crate::context::{
    Clock,
    SystemClock,
};
use crate::culture::Culture;
use crate::prompt::{
    LocalizationDocument,
    TextPrompt,
};

/// Clones a document into a new culture with every translation cleared.
#[derive(Debug, Clone)]
pub struct CultureSeeder {
    /// Time source for `updated_at`
    clock: Arc<dyn Clock>,
}

impl CultureSeeder {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Produces the document for `target` from `source`.
    ///
    /// Keys, controller, action and source text are kept; `translated_text` is emptied and
    /// provenance is stamped with the current time and `principal`. `source` is left untouched.
    #[must_use]
    pub fn clone_document(
        &self,
        source: &LocalizationDocument,
        target: &Culture,
        principal: &str,
    ) -> LocalizationDocument {
        let updated_at = self.clock.now();
        let prompts = source
            .prompts
            .iter()
            .map(|prompt| TextPrompt {
                translated_text: String::new(),
                updated_at: Some(updated_at),
                updated_by: Some(principal.to_string()),
                ..prompt.clone()
            })
            .collect();

        LocalizationDocument { prompts, ..LocalizationDocument::new(target.clone()) }
    }
}

impl Default for CultureSeeder {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use chrono::{
        TimeZone,
        Utc,
    };
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::context::FixedClock;
    use crate::key::build_key;

    fn english_document() -> LocalizationDocument {
        let mut document = LocalizationDocument::new(Culture::default());
        for (action, text, translated) in
            [("Index", "Hello", "Hello"), ("About", "Who we are", ""), ("Index", "Bye", "Bye")]
        {
            document.insert_if_absent(TextPrompt {
                translated_text: translated.to_string(),
                ..TextPrompt::template(build_key("Home", action, text), "Home", action, text)
            });
        }
        document
    }

    fn seeder() -> CultureSeeder {
        let instant = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        CultureSeeder::new(Arc::new(FixedClock(instant)))
    }

    #[rstest]
    fn clone_keeps_keys_and_clears_translations() {
        let source = english_document();
        let target = Culture::new("sv-SE").unwrap();

        let cloned = seeder().clone_document(&source, &target, "alice");

        assert_that!(cloned.len(), eq(source.len()));
        assert_that!(cloned.prompts, each(field!(TextPrompt.translated_text, eq(""))));
        let source_keys: Vec<_> = source.prompts.iter().map(|p| p.key.clone()).collect();
        let cloned_keys: Vec<_> = cloned.prompts.iter().map(|p| p.key.clone()).collect();
        assert_eq!(cloned_keys, source_keys);
    }

    #[rstest]
    fn clone_sets_culture_and_id() {
        let target = Culture::new("sv_se").unwrap();

        let cloned = seeder().clone_document(&english_document(), &target, "alice");

        assert_eq!(cloned.culture, target);
        assert_that!(cloned.id, eq("sv-SE"));
    }

    #[rstest]
    fn clone_stamps_provenance() {
        let cloned =
            seeder().clone_document(&english_document(), &Culture::new("de").unwrap(), "bob");
        let expected = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        assert_that!(
            cloned.prompts,
            each(all![
                field!(TextPrompt.updated_by, some(eq("bob"))),
                field!(TextPrompt.updated_at, some(eq(&expected)))
            ])
        );
    }

    #[rstest]
    fn clone_keeps_origin_fields() {
        let source = english_document();

        let cloned = seeder().clone_document(&source, &Culture::new("de").unwrap(), "bob");

        assert_that!(cloned.prompts[1].controller_name, eq("Home"));
        assert_that!(cloned.prompts[1].action_name, eq("About"));
        assert_that!(cloned.prompts[1].source_text, eq("Who we are"));
    }

    #[rstest]
    fn clone_does_not_mutate_source() {
        let source = english_document();
        let before = source.clone();

        let _ = seeder().clone_document(&source, &Culture::new("fi-FI").unwrap(), "carol");

        assert_eq!(source, before);
    }

    #[rstest]
    fn clone_of_empty_document_is_empty() {
        let source = LocalizationDocument::new(Culture::default());

        let cloned = seeder().clone_document(&source, &Culture::new("fi-FI").unwrap(), "carol");

        assert_that!(cloned.is_empty(), eq(true));
        assert_that!(cloned.id, eq("fi-FI"));
    }
}
