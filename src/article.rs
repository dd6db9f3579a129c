//! Article identity and storage naming.
//!
//! A document is addressed by `(slug, lang)`. The storage key is
//! `{slug}.mdx` for the source language and `{slug}.{lang}.mdx` for every
//! translation, so two documents can never share a key.

use crate::i18n::Language;
use chrono::{DateTime, NaiveDate, Utc};

pub const DOCUMENT_EXTENSION: &str = ".mdx";

/// Identity of one article document in one locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleKey {
    pub slug: String,
    pub lang: Language,
}

impl ArticleKey {
    pub fn new(slug: impl Into<String>, lang: Language) -> Self {
        Self {
            slug: slug.into(),
            lang,
        }
    }

    /// Deterministic storage key for this document.
    pub fn storage_key(&self) -> String {
        if self.lang.is_canonical() {
            format!("{}{}", self.slug, DOCUMENT_EXTENSION)
        } else {
            format!("{}.{}{}", self.slug, self.lang.code(), DOCUMENT_EXTENSION)
        }
    }

    /// Parse a storage key (or a bare file name) back into an article key.
    ///
    /// The trailing `.{code}` is treated as a locale only when `code` is a
    /// supported language; `guide.v2.mdx` is the source-language slug
    /// `guide.v2`. Returns `None` for non-document names and hidden/backup
    /// files.
    pub fn parse(file_name: &str) -> Option<Self> {
        if file_name.starts_with('.') || file_name.starts_with('~') {
            return None;
        }

        let stem = file_name.strip_suffix(DOCUMENT_EXTENSION)?;
        if stem.is_empty() {
            return None;
        }

        if let Some((base, code)) = stem.rsplit_once('.') {
            if let Ok(lang) = Language::from_code(code) {
                if base.is_empty() {
                    return None;
                }
                return Some(Self::new(base, lang));
            }
        }

        Some(Self::new(stem, Language::canonical()))
    }
}

/// A slug is URL-safe when it is non-empty and made only of lowercase
/// ASCII letters, digits, `-` and `_`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Parse an article `date`: RFC 3339 or a plain `YYYY-MM-DD` (midnight UTC).
pub fn parse_article_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_source_language_has_no_suffix() {
        let key = ArticleKey::new("open-company", Language::ITALIAN);
        assert_eq!(key.storage_key(), "open-company.mdx");
    }

    #[test]
    fn test_storage_key_translation_has_suffix() {
        let key = ArticleKey::new("open-company", Language::ENGLISH);
        assert_eq!(key.storage_key(), "open-company.en.mdx");
    }

    #[test]
    fn test_parse_source_and_translation() {
        assert_eq!(
            ArticleKey::parse("open-company.mdx"),
            Some(ArticleKey::new("open-company", Language::ITALIAN))
        );
        assert_eq!(
            ArticleKey::parse("open-company.de.mdx"),
            Some(ArticleKey::new("open-company", Language::GERMAN))
        );
    }

    #[test]
    fn test_parse_unknown_suffix_is_part_of_slug() {
        assert_eq!(
            ArticleKey::parse("guida.v2.mdx"),
            Some(ArticleKey::new("guida.v2", Language::ITALIAN))
        );
        assert_eq!(
            ArticleKey::parse("guida.pt.mdx"),
            Some(ArticleKey::new("guida.pt", Language::ITALIAN))
        );
    }

    #[test]
    fn test_parse_rejects_non_documents() {
        assert_eq!(ArticleKey::parse("README.md"), None);
        assert_eq!(ArticleKey::parse(".mdx"), None);
        assert_eq!(ArticleKey::parse(".draft.mdx"), None);
        assert_eq!(ArticleKey::parse("~backup.mdx"), None);
        assert_eq!(ArticleKey::parse(".en.mdx"), None);
    }

    #[test]
    fn test_parse_inverts_storage_key() {
        for lang in Language::all() {
            let key = ArticleKey::new("regime-forfettario-2025", lang);
            assert_eq!(ArticleKey::parse(&key.storage_key()), Some(key));
        }
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("open-company"));
        assert!(is_valid_slug("srl_2025"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("../etc/passwd"));
        assert!(!is_valid_slug("Open Company"));
        assert!(!is_valid_slug("open-company.en"));
    }

    #[test]
    fn test_parse_article_date() {
        let plain = parse_article_date("2024-05-20").expect("plain date");
        assert_eq!(plain.to_rfc3339(), "2024-05-20T00:00:00+00:00");

        let full = parse_article_date("2024-05-20T10:30:00+02:00").expect("rfc3339");
        assert_eq!(full.to_rfc3339(), "2024-05-20T08:30:00+00:00");

        assert!(parse_article_date("20 maggio 2024").is_none());
        assert!(parse_article_date("").is_none());
    }
}
