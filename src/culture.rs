//! Culture identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::LocalizerError;

/// Well known Windows locale identifiers and their culture names.
const LCID_TABLE: &[(u32, &str)] = &[
    (1028, "zh-TW"),
    (1031, "de-DE"),
    (1033, "en-US"),
    (1034, "es-ES"),
    (1036, "fr-FR"),
    (1040, "it-IT"),
    (1041, "ja-JP"),
    (1042, "ko-KR"),
    (1043, "nl-NL"),
    (1044, "nb-NO"),
    (1046, "pt-BR"),
    (1049, "ru-RU"),
    (1053, "sv-SE"),
    (2052, "zh-CN"),
    (2057, "en-GB"),
    (2070, "pt-PT"),
    (3082, "es-ES"),
];

/// LCID of the default culture (English, United States).
pub const DEFAULT_LCID: u32 = 1033;

/// Name of the default culture.
pub const DEFAULT_CULTURE_NAME: &str = "en-US";

/// A locale identifier selecting which set of translations applies.
///
/// The name is normalised on construction (`fr_fr` -> `fr-FR`, `zh-hant-tw` -> `zh-Hant-TW`),
/// so equality is insensitive to casing and separator style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Culture {
    /// Normalised culture name
    name: String,
}

impl Culture {
    /// Parses and normalises a culture name. An all-digit name is read as a Windows LCID.
    ///
    /// # Errors
    /// `LocalizerError::InvalidCulture` when the name is empty, contains characters other than
    /// ASCII alphanumerics, `-` and `_`, or is an LCID missing from the table.
    pub fn new(name: &str) -> Result<Self, LocalizerError> {
        let trimmed = name.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            return trimmed
                .parse()
                .ok()
                .and_then(Self::from_lcid)
                .ok_or_else(|| LocalizerError::InvalidCulture(name.to_string()));
        }
        let valid = !trimmed.is_empty()
            && trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            && trimmed.split(['-', '_']).all(|subtag| !subtag.is_empty());
        if !valid {
            return Err(LocalizerError::InvalidCulture(name.to_string()));
        }

        Ok(Self { name: normalize_culture_name(trimmed) })
    }

    /// Looks up a culture by Windows LCID.
    #[must_use]
    pub fn from_lcid(lcid: u32) -> Option<Self> {
        LCID_TABLE
            .iter()
            .find(|(id, _)| *id == lcid)
            .map(|(_, name)| Self { name: (*name).to_string() })
    }

    /// The default culture, `en-US`.
    #[must_use]
    pub fn default_culture() -> Self {
        Self { name: DEFAULT_CULTURE_NAME.to_string() }
    }

    /// Normalised name, also used as the display name of the culture.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Windows LCID of this culture, if it is one of the well known ones.
    #[must_use]
    pub fn lcid(&self) -> Option<u32> {
        LCID_TABLE.iter().find(|(_, name)| *name == self.name).map(|(id, _)| *id)
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::default_culture()
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Culture {
    type Err = LocalizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Culture {
    type Error = LocalizerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Culture> for String {
    fn from(culture: Culture) -> Self {
        culture.name
    }
}

/// Normalise subtag casing and separators.
///
/// The first subtag is the language (lowercase), four letter subtags are scripts (title case),
/// two letter or three digit subtags are regions (uppercase).
fn normalize_culture_name(name: &str) -> String {
    name.split(['-', '_'])
        .enumerate()
        .map(|(index, subtag)| {
            if index == 0 {
                subtag.to_ascii_lowercase()
            } else if subtag.len() == 4 && subtag.chars().all(|c| c.is_ascii_alphabetic()) {
                let mut chars = subtag.chars();
                chars.next().map_or_else(String::new, |first| {
                    let mut titled = first.to_ascii_uppercase().to_string();
                    titled.push_str(&chars.as_str().to_ascii_lowercase());
                    titled
                })
            } else if (subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()))
                || (subtag.len() == 3 && subtag.chars().all(|c| c.is_ascii_digit()))
            {
                subtag.to_ascii_uppercase()
            } else {
                subtag.to_ascii_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
