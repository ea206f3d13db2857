//! Text key derivation.

use sha2::{
    Digest,
    Sha256,
};

use crate::prompt::TextKey;

/// Action name used when the caller does not supply one.
pub const DEFAULT_ACTION_NAME: &str = "Index";

/// Derives prompt keys from `(controller, action, source text)`.
///
/// Each field is length-prefixed before hashing, so `("ab", "c")` and `("a", "bc")` never share
/// an input. The key is the lowercase hex SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBuilder {
    /// Substituted for an empty action name
    default_action_name: String,
}

impl KeyBuilder {
    #[must_use]
    pub fn new(default_action_name: impl Into<String>) -> Self {
        Self { default_action_name: default_action_name.into() }
    }

    /// Action name after default substitution.
    #[must_use]
    pub fn resolve_action<'a>(&'a self, action_name: Option<&'a str>) -> &'a str {
        match action_name {
            Some(action) if !action.is_empty() => action,
            _ => &self.default_action_name,
        }
    }

    /// Builds the key for a prompt. An empty `action_name` is replaced by the default action.
    #[must_use]
    pub fn build_key(&self, controller_name: &str, action_name: &str, source_text: &str) -> TextKey {
        let action = self.resolve_action(Some(action_name));

        let mut hasher = Sha256::new();
        for field in [controller_name, action, source_text] {
            hasher.update(field.len().to_string().as_bytes());
            hasher.update(b":");
            hasher.update(field.as_bytes());
        }
        TextKey::new(format!("{:x}", hasher.finalize()))
    }
}

impl Default for KeyBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_ACTION_NAME)
    }
}

/// Builds a key with the conventional `Index` default action.
#[must_use]
pub fn build_key(controller_name: &str, action_name: &str, source_text: &str) -> TextKey {
    KeyBuilder::default().build_key(controller_name, action_name, source_text)
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn build_key_is_deterministic() {
        let first = build_key("Home", "About", "Welcome");
        let second = build_key("Home", "About", "Welcome");

        assert_that!(first.as_str(), eq(second.as_str()));
    }

    #[rstest]
    fn empty_action_uses_index() {
        let implicit = build_key("Home", "", "Welcome");
        let explicit = build_key("Home", "Index", "Welcome");

        assert_that!(implicit.as_str(), eq(explicit.as_str()));
    }

    #[rstest]
    fn custom_default_action_is_substituted() {
        let builder = KeyBuilder::new("Show");
        let implicit = builder.build_key("Users", "", "Name");
        let explicit = builder.build_key("Users", "Show", "Name");
        let with_index = build_key("Users", "", "Name");

        assert_that!(implicit.as_str(), eq(explicit.as_str()));
        assert_that!(implicit.as_str(), not(eq(with_index.as_str())));
    }

    #[rstest]
    #[case::controller(("Home", "Index", "Hello"), ("Admin", "Index", "Hello"))]
    #[case::action(("Home", "Index", "Hello"), ("Home", "Edit", "Hello"))]
    #[case::text(("Home", "Index", "Hello"), ("Home", "Index", "Hello!"))]
    #[case::shifted_boundary(("ab", "c", "d"), ("a", "bc", "d"))]
    #[case::shifted_text_boundary(("Home", "In", "dexHello"), ("Home", "Index", "Hello"))]
    fn different_inputs_give_different_keys(
        #[case] left: (&str, &str, &str),
        #[case] right: (&str, &str, &str),
    ) {
        let left_key = build_key(left.0, left.1, left.2);
        let right_key = build_key(right.0, right.1, right.2);

        assert_that!(left_key.as_str(), not(eq(right_key.as_str())));
    }

    #[rstest]
    fn key_is_hex_sha256() {
        let key = build_key("Home", "Index", "Hello");

        assert_that!(key.as_str().len(), eq(64));
        assert_that!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()), eq(true));
    }

    #[rstest]
    #[case(None, "Index")]
    #[case(Some(""), "Index")]
    #[case(Some("Edit"), "Edit")]
    fn test_resolve_action(#[case] action: Option<&str>, #[case] expected: &str) {
        let builder = KeyBuilder::default();

        assert_that!(builder.resolve_action(action), eq(expected));
    }
}
