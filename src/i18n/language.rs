//! Language type: Flexible, validated language representation.
//!
//! A `Language` can only be constructed from a code that exists in the
//! registry and is enabled, so holding one is proof the locale is supported.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use std::fmt;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "it", "en")
    code: &'static str,
}

impl Language {
    pub const ITALIAN: Language = Language { code: "it" };
    pub const ENGLISH: Language = Language { code: "en" };
    pub const GERMAN: Language = Language { code: "de" };
    pub const FRENCH: Language = Language { code: "fr" };
    pub const SPANISH: Language = Language { code: "es" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err` if the code is not found or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language {
                code: config.code, // Use the static str from the registry
            }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Get the canonical (source) language.
    ///
    /// Articles are authored in this language and translated from it.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// All enabled languages in registry order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// All enabled languages a document can be translated into.
    pub fn translation_targets() -> Vec<Language> {
        Self::all()
            .into_iter()
            .filter(|lang| !lang.is_canonical())
            .collect()
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This should
    /// never happen if the Language was constructed properly (via `from_code`
    /// or constants).
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Check if this is the canonical language.
    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_italian_constant() {
        let italian = Language::ITALIAN;
        assert_eq!(italian.code(), "it");
        assert_eq!(italian.name(), "Italian");
        assert!(italian.is_canonical());
    }

    #[test]
    fn test_target_constants_are_not_canonical() {
        for lang in [
            Language::ENGLISH,
            Language::GERMAN,
            Language::FRENCH,
            Language::SPANISH,
        ] {
            assert!(!lang.is_canonical(), "{} should not be canonical", lang);
        }
    }

    #[test]
    fn test_from_code_french() {
        let language = Language::from_code("fr").expect("Should succeed");
        assert_eq!(language, Language::FRENCH);
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("pt");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_is_case_sensitive() {
        assert!(Language::from_code("EN").is_err());
        assert!(Language::from_code("").is_err());
    }

    #[test]
    fn test_canonical_returns_italian() {
        assert_eq!(Language::canonical(), Language::ITALIAN);
    }

    #[test]
    fn test_translation_targets_exclude_source() {
        let targets = Language::translation_targets();
        assert_eq!(
            targets,
            vec![
                Language::ENGLISH,
                Language::GERMAN,
                Language::FRENCH,
                Language::SPANISH
            ]
        );
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(Language::GERMAN.to_string(), "de");
    }
}
