//! Language registry: Single source of truth for all supported locales.
//!
//! The site is authored in Italian and translated into English, German,
//! French and Spanish. The registry is a lazily initialised singleton;
//! request validation and head generation both read locales from it.

use crate::i18n::strings::{
    LanguageStrings, ENGLISH_STRINGS, FRENCH_STRINGS, GERMAN_STRINGS, ITALIAN_STRINGS,
    SPANISH_STRINGS,
};
use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "it", "en")
    pub code: &'static str,

    /// English name of the language, used in translation prompts
    pub name: &'static str,

    /// Native name of the language (e.g., "Italiano", "Deutsch")
    pub native_name: &'static str,

    /// Whether this is the source language (only one should be true).
    /// Documents in this language are stored without a locale suffix.
    pub is_canonical: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,

    /// Static, pre-authored copy for this language
    pub strings: LanguageStrings,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in registry order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the canonical language configuration.
    ///
    /// # Panics
    /// Panics if no canonical language is found or if multiple canonical
    /// languages are defined (this indicates a configuration error).
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }
}

/// Default language configurations.
///
/// Order matters: it is the order in which hreflang alternates and
/// per-locale sitemaps are emitted.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "it",
            name: "Italian",
            native_name: "Italiano",
            is_canonical: true,
            enabled: true,
            strings: ITALIAN_STRINGS,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: false,
            enabled: true,
            strings: ENGLISH_STRINGS,
        },
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            is_canonical: false,
            enabled: true,
            strings: GERMAN_STRINGS,
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            is_canonical: false,
            enabled: true,
            strings: FRENCH_STRINGS,
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_canonical: false,
            enabled: true,
            strings: SPANISH_STRINGS,
        },
    ]
}
