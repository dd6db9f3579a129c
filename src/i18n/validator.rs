//! Translation quality validation module.
//!
//! Checks that a translated article body kept the structure of the source:
//! headings, URLs, markdown links and images, code fences and MDX component
//! tags. Findings are reported, never enforced; the caller decides whether
//! to log them.

use regex::Regex;
use std::sync::OnceLock;

/// Translations shorter than this fraction of the source are flagged as
/// probably truncated.
const MIN_LENGTH_RATIO: f64 = 0.3;

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Critical errors that indicate translation issues
    pub errors: Vec<String>,

    /// Non-critical warnings about potential issues
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation quality.
pub struct TranslationValidator;

// Regex patterns for extraction (cached for performance)
static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static MARKDOWN_LINK_REGEX: OnceLock<Regex> = OnceLock::new();
static COMPONENT_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate that a translated body preserves the structure of the original.
    ///
    /// Warnings:
    /// - heading count changed
    /// - URLs changed
    /// - markdown link/image count changed
    /// - MDX component tags changed
    ///
    /// Errors:
    /// - unbalanced code fences in the translation
    /// - translation much shorter than the original
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        let orig_headings = Self::count_headings(original);
        let trans_headings = Self::count_headings(translated);
        if orig_headings != trans_headings {
            report.warnings.push(format!(
                "Heading count mismatch: original has {}, translation has {}",
                orig_headings, trans_headings
            ));
        }

        let orig_urls = Self::extract_urls(original);
        let trans_urls = Self::extract_urls(translated);
        if orig_urls != trans_urls {
            report.warnings.push(format!(
                "URL mismatch: original has {} URLs, translation has {} URLs",
                orig_urls.len(),
                trans_urls.len()
            ));
        }

        let orig_md_links = Self::extract_markdown_links(original);
        let trans_md_links = Self::extract_markdown_links(translated);
        if orig_md_links.len() != trans_md_links.len() {
            report.warnings.push(format!(
                "Markdown link count mismatch: original has {}, translation has {}",
                orig_md_links.len(),
                trans_md_links.len()
            ));
        }

        let orig_components = Self::extract_components(original);
        let trans_components = Self::extract_components(translated);
        if orig_components != trans_components {
            report.warnings.push(format!(
                "MDX component mismatch: original has {:?}, translation has {:?}",
                orig_components, trans_components
            ));
        }

        if Self::count_code_fences(translated) % 2 != 0 {
            report
                .errors
                .push("Translation contains an unclosed code fence".to_string());
        }

        let orig_len = original.trim().chars().count();
        let trans_len = translated.trim().chars().count();
        if orig_len > 0 && (trans_len as f64) < (orig_len as f64) * MIN_LENGTH_RATIO {
            report.errors.push(format!(
                "Translation looks truncated: {} characters for a {} character original",
                trans_len, orig_len
            ));
        }

        report
    }

    /// Count ATX headings outside code fences
    fn count_headings(text: &str) -> usize {
        let regex = HEADING_REGEX.get_or_init(|| Regex::new(r"^#{1,6}\s+\S").unwrap());

        let mut in_fence = false;
        text.lines()
            .filter(|line| {
                if line.trim_start().starts_with("```") {
                    in_fence = !in_fence;
                    return false;
                }
                !in_fence && regex.is_match(line)
            })
            .count()
    }

    /// Extract all URLs from text
    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| Regex::new(r#"https?://[^\s)\]"'>]+"#).unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Extract markdown links and images from text (approximate)
    fn extract_markdown_links(text: &str) -> Vec<String> {
        let regex =
            MARKDOWN_LINK_REGEX.get_or_init(|| Regex::new(r"!?\[([^\]]*)\]\(([^)]+)\)").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Extract opening MDX component names (`<Callout`, `<LeadMagnetBox`)
    fn extract_components(text: &str) -> Vec<String> {
        let regex = COMPONENT_REGEX.get_or_init(|| Regex::new(r"<([A-Z][A-Za-z0-9]*)").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }

    fn count_code_fences(text: &str) -> usize {
        text.lines()
            .filter(|line| line.trim_start().starts_with("```"))
            .count()
    }
}
