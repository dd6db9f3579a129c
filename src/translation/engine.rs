use crate::frontmatter::Frontmatter;
use crate::i18n::{Language, TranslationValidator};
use crate::translation::{
    FieldFormat, LeadMagnetOverrides, PositionalLines, TextGenerator, TranslationError,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Metadata fields sent to the generator, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetadataField {
    Title,
    Excerpt,
    Description,
}

impl MetadataField {
    const ALL: [MetadataField; 3] = [Self::Title, Self::Excerpt, Self::Description];

    fn slot(self, metadata: &mut Frontmatter) -> &mut Option<String> {
        match self {
            Self::Title => &mut metadata.title,
            Self::Excerpt => &mut metadata.excerpt,
            Self::Description => &mut metadata.description,
        }
    }

    fn value(self, metadata: &Frontmatter) -> Option<&str> {
        match self {
            Self::Title => metadata.title.as_deref(),
            Self::Excerpt => metadata.excerpt.as_deref(),
            Self::Description => metadata.description.as_deref(),
        }
    }
}

/// Result of metadata translation. Never an error: on failure the source
/// values are kept and the reason is reported.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataOutcome {
    Translated(Frontmatter),
    Degraded { metadata: Frontmatter, reason: String },
}

impl MetadataOutcome {
    pub fn metadata(&self) -> &Frontmatter {
        match self {
            Self::Translated(metadata) | Self::Degraded { metadata, .. } => metadata,
        }
    }

    pub fn into_metadata(self) -> Frontmatter {
        match self {
            Self::Translated(metadata) | Self::Degraded { metadata, .. } => metadata,
        }
    }

    /// Why the source values were kept, if they were.
    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            Self::Translated(_) => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// Build the system prompt for body translation
fn build_body_system_prompt(target_language: &str) -> String {
    format!(
        r#"You are a professional translator. Translate the following Italian article to {}.

## Translation Rules

### DO NOT translate or change:
- Code blocks and inline code
- URLs and link targets
- JSX/MDX component tags and their attributes (e.g., <Callout>, <LeadMagnetBox />)
- Frontmatter keys or metadata
- Names of Italian laws, forms and institutions (e.g., Agenzia delle Entrate, modello F24)

### DO translate:
- Headings, paragraphs, list items and table cells
- Link text and image alt text

### Formatting:
- Preserve all markdown and MDX structure exactly
- Keep the same headings, lists, tables and line breaks
- Answer with the translated article only, without explanations"#,
        target_language
    )
}

/// Translates article bodies and metadata into a target locale.
pub struct TranslationEngine {
    generator: Arc<dyn TextGenerator>,
    format: Box<dyn FieldFormat>,
    overrides: LeadMagnetOverrides,
}

impl TranslationEngine {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            format: Box::new(PositionalLines),
            overrides: LeadMagnetOverrides::default(),
        }
    }

    pub fn with_format(mut self, format: impl FieldFormat + 'static) -> Self {
        self.format = Box::new(format);
        self
    }

    pub fn with_overrides(mut self, overrides: LeadMagnetOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn check_configured(&self) -> Result<(), TranslationError> {
        self.generator.check_configured()
    }

    /// Translate an article body. Any failure is returned to the caller.
    ///
    /// The result is compared structurally with the source; findings are
    /// logged and never fail the translation.
    pub async fn translate_body(
        &self,
        body: &str,
        target: Language,
    ) -> Result<String, TranslationError> {
        let translated = self
            .generator
            .generate(&build_body_system_prompt(target.name()), body)
            .await?;

        let translated = translated.trim();
        if translated.is_empty() {
            return Err(TranslationError::Empty);
        }

        let validation = TranslationValidator::validate(body, translated);
        if validation.is_clean() {
            debug!(target_lang = %target, "Body translation passed validation");
        }
        if validation.has_warnings() {
            warn!(
                target_lang = %target,
                warnings = ?validation.warnings,
                "Body translation validation warnings"
            );
        }
        if validation.has_errors() {
            warn!(
                target_lang = %target,
                errors = ?validation.errors,
                "Body translation validation errors"
            );
        }

        Ok(format!("{}\n", translated))
    }

    /// Translate `title`, `excerpt` and `description`; everything else is
    /// copied. Lead-magnet copy comes from the override table in both
    /// outcomes.
    pub async fn translate_metadata(
        &self,
        metadata: &Frontmatter,
        target: Language,
    ) -> MetadataOutcome {
        let mut translated = metadata.clone();
        self.overrides.apply(&mut translated, target);

        let fields: Vec<(MetadataField, &str)> = MetadataField::ALL
            .iter()
            .filter_map(|field| {
                field
                    .value(metadata)
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| (*field, value))
            })
            .collect();

        if fields.is_empty() {
            return MetadataOutcome::Translated(translated);
        }

        let values: Vec<&str> = fields.iter().map(|(_, value)| *value).collect();
        let response = match self
            .generator
            .generate(&self.format.system_prompt(target), &self.format.render(&values))
            .await
        {
            Ok(response) => response,
            Err(e) => return self.degrade(translated, target, e.to_string()),
        };

        let lines = self.format.parse(&response, fields.len());
        if lines.is_empty() {
            return self.degrade(
                translated,
                target,
                "response contained no usable lines".to_string(),
            );
        }

        if lines.len() < fields.len() {
            warn!(
                target_lang = %target,
                expected = fields.len(),
                received = lines.len(),
                "Metadata translation returned fewer lines than fields"
            );
        }

        for ((field, _), line) in fields.iter().zip(lines) {
            *field.slot(&mut translated) = Some(line);
        }

        info!(target_lang = %target, fields = fields.len(), "Translated metadata");
        MetadataOutcome::Translated(translated)
    }

    fn degrade(&self, metadata: Frontmatter, target: Language, reason: String) -> MetadataOutcome {
        warn!(
            target_lang = %target,
            stage = "metadata",
            reason = %reason,
            "Metadata translation degraded, keeping source values"
        );
        MetadataOutcome::Degraded { metadata, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::LeadMagnet;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Generator that replays canned responses and records every call.
    #[derive(Default)]
    struct ScriptedGenerator {
        responses: Mutex<VecDeque<Result<String, TranslationError>>>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedGenerator {
        fn new(responses: Vec<Result<String, TranslationError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        fn check_configured(&self) -> Result<(), TranslationError> {
            Ok(())
        }

        async fn generate(&self, system: &str, user: &str) -> Result<String, TranslationError> {
            self.calls
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(TranslationError::Empty))
        }
    }

    fn source_metadata() -> Frontmatter {
        Frontmatter {
            title: Some("Aprire una SRL".into()),
            excerpt: Some("Guida\nin due righe".into()),
            description: Some("Tutto sulla SRL".into()),
            category: Some("Business".into()),
            cover_image: Some("/images/srl.webp".into()),
            lead_magnet: Some(LeadMagnet {
                title: Some("Guida Completa".into()),
                description: Some("Scarica".into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    // ==================== Body Tests ====================

    #[tokio::test]
    async fn test_translate_body_success() {
        let generator = ScriptedGenerator::new(vec![Ok("\n# Open an SRL\n\nText.  ".into())]);
        let engine = TranslationEngine::new(generator.clone());

        let body = engine
            .translate_body("# Aprire una SRL\n\nTesto.", Language::ENGLISH)
            .await
            .expect("should translate");

        assert_eq!(body, "# Open an SRL\n\nText.\n");
        let calls = generator.calls();
        assert!(calls[0].0.contains("Italian article to English"));
        assert_eq!(calls[0].1, "# Aprire una SRL\n\nTesto.");
    }

    #[tokio::test]
    async fn test_translate_body_failure_is_returned() {
        let generator = ScriptedGenerator::new(vec![Err(TranslationError::Api {
            status: 500,
            body: "boom".into(),
        })]);
        let engine = TranslationEngine::new(generator);

        let result = engine.translate_body("Testo", Language::GERMAN).await;
        assert!(matches!(result, Err(TranslationError::Api { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_translate_body_blank_output_is_empty() {
        let generator = ScriptedGenerator::new(vec![Ok("   ".into())]);
        let engine = TranslationEngine::new(generator);

        let result = engine.translate_body("Testo", Language::FRENCH).await;
        assert_eq!(result, Err(TranslationError::Empty));
    }

    // ==================== Metadata Tests ====================

    #[tokio::test]
    async fn test_translate_metadata_positional() {
        let generator = ScriptedGenerator::new(vec![Ok(
            "Opening an SRL\nA guide in two lines\nAll about the SRL".into(),
        )]);
        let engine = TranslationEngine::new(generator.clone());

        let outcome = engine
            .translate_metadata(&source_metadata(), Language::ENGLISH)
            .await;

        let MetadataOutcome::Translated(metadata) = outcome else {
            panic!("expected translated outcome, got {:?}", outcome);
        };
        assert_eq!(metadata.title.as_deref(), Some("Opening an SRL"));
        assert_eq!(metadata.excerpt.as_deref(), Some("A guide in two lines"));
        assert_eq!(metadata.description.as_deref(), Some("All about the SRL"));
        assert_eq!(metadata.category.as_deref(), Some("Business"));
        assert_eq!(metadata.cover_image.as_deref(), Some("/images/srl.webp"));

        // Multi-line excerpt travels as one line
        assert_eq!(
            generator.calls()[0].1,
            "Aprire una SRL\nGuida in due righe\nTutto sulla SRL"
        );
    }

    #[tokio::test]
    async fn test_translate_metadata_skips_absent_fields() {
        let generator = ScriptedGenerator::new(vec![Ok("Opening an SRL\nAbout the SRL".into())]);
        let engine = TranslationEngine::new(generator.clone());
        let metadata = Frontmatter {
            title: Some("Aprire una SRL".into()),
            excerpt: Some("   ".into()),
            description: Some("Sulla SRL".into()),
            ..Default::default()
        };

        let outcome = engine.translate_metadata(&metadata, Language::ENGLISH).await;
        let translated = outcome.metadata();

        assert_eq!(translated.title.as_deref(), Some("Opening an SRL"));
        assert_eq!(translated.excerpt.as_deref(), Some("   "));
        assert_eq!(translated.description.as_deref(), Some("About the SRL"));
        assert_eq!(generator.calls()[0].1, "Aprire una SRL\nSulla SRL");
    }

    #[tokio::test]
    async fn test_translate_metadata_missing_lines_leave_fields() {
        let generator = ScriptedGenerator::new(vec![Ok("Opening an SRL\n".into())]);
        let engine = TranslationEngine::new(generator);

        let outcome = engine
            .translate_metadata(&source_metadata(), Language::ENGLISH)
            .await;

        assert_eq!(outcome.degraded_reason(), None);
        assert_eq!(outcome.metadata().title.as_deref(), Some("Opening an SRL"));
        assert_eq!(
            outcome.metadata().excerpt.as_deref(),
            Some("Guida\nin due righe")
        );
    }

    #[tokio::test]
    async fn test_translate_metadata_failure_degrades() {
        let generator = ScriptedGenerator::new(vec![Err(TranslationError::Request(
            "connection reset".into(),
        ))]);
        let engine = TranslationEngine::new(generator);
        let source = source_metadata();

        let outcome = engine.translate_metadata(&source, Language::GERMAN).await;

        let MetadataOutcome::Degraded { metadata, reason } = outcome else {
            panic!("expected degraded outcome");
        };
        assert!(reason.contains("connection reset"));
        assert_eq!(metadata.title, source.title);
        // Override still applies when degraded
        assert_eq!(
            metadata.lead_magnet.unwrap().title.as_deref(),
            Some(Language::GERMAN.config().strings.lead_magnet_title)
        );
    }

    #[tokio::test]
    async fn test_translate_metadata_blank_response_degrades() {
        let generator = ScriptedGenerator::new(vec![Ok("\n\n".into())]);
        let engine = TranslationEngine::new(generator);

        let outcome = engine
            .translate_metadata(&source_metadata(), Language::SPANISH)
            .await;
        assert!(outcome.degraded_reason().is_some());
    }

    #[tokio::test]
    async fn test_translate_metadata_lead_magnet_never_sent() {
        let generator =
            ScriptedGenerator::new(vec![Ok("Title\nExcerpt\nDescription".into())]);
        let engine = TranslationEngine::new(generator.clone());

        let outcome = engine
            .translate_metadata(&source_metadata(), Language::ENGLISH)
            .await;

        assert!(!generator.calls()[0].1.contains("Guida Completa"));
        assert_eq!(
            outcome.metadata().lead_magnet.as_ref().unwrap().title.as_deref(),
            Some("Complete Guide: How to Start a Business in Italy as a Foreigner")
        );
    }

    #[tokio::test]
    async fn test_translate_metadata_without_override_entry() {
        let generator =
            ScriptedGenerator::new(vec![Ok("Title\nExcerpt\nDescription".into())]);
        let engine = TranslationEngine::new(generator).with_overrides(LeadMagnetOverrides::empty());

        let outcome = engine
            .translate_metadata(&source_metadata(), Language::ENGLISH)
            .await;

        assert_eq!(
            outcome.metadata().lead_magnet.as_ref().unwrap().title.as_deref(),
            Some("Guida Completa")
        );
    }

    #[tokio::test]
    async fn test_translate_metadata_nothing_to_send() {
        let generator = ScriptedGenerator::new(vec![]);
        let engine = TranslationEngine::new(generator.clone());
        let metadata = Frontmatter {
            category: Some("Tasse".into()),
            ..Default::default()
        };

        let outcome = engine.translate_metadata(&metadata, Language::ENGLISH).await;

        assert_eq!(outcome, MetadataOutcome::Translated(metadata));
        assert!(generator.calls().is_empty());
    }

    /// Alternative format: values separated by `|`.
    struct PipeSeparated;

    impl FieldFormat for PipeSeparated {
        fn system_prompt(&self, target: Language) -> String {
            format!("Translate to {} keeping | separators", target.name())
        }

        fn render(&self, values: &[&str]) -> String {
            values.join(" | ")
        }

        fn parse(&self, response: &str, expected: usize) -> Vec<String> {
            response
                .split('|')
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .take(expected)
                .collect()
        }
    }

    #[tokio::test]
    async fn test_custom_field_format() {
        let generator = ScriptedGenerator::new(vec![Ok("Titre | Extrait | Description".into())]);
        let engine = TranslationEngine::new(generator.clone()).with_format(PipeSeparated);

        let outcome = engine
            .translate_metadata(&source_metadata(), Language::FRENCH)
            .await;

        assert_eq!(outcome.metadata().excerpt.as_deref(), Some("Extrait"));
        assert!(generator.calls()[0].0.contains("keeping | separators"));
    }
}
