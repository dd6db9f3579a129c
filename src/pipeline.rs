//! The translate-and-publish request path.
//!
//! validate → credentials → read source → decode → translate body →
//! translate metadata → publish. Every step before publishing can abort the
//! request; nothing is written unless the body translation succeeded.

use crate::article::{is_valid_slug, ArticleKey};
use crate::frontmatter;
use crate::i18n::Language;
use crate::publisher::{PublishError, PublishedArticle, Publisher};
use crate::store::{ContentStore, StoreError};
use crate::translation::{TranslationEngine, TranslationError};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{message}")]
    InvalidRequest {
        message: String,
        received: Option<Value>,
    },

    #[error("Server configuration error: Missing {0}")]
    Configuration(&'static str),

    #[error("Original article not found")]
    NotFound { file_name: String },

    #[error("Malformed document ({stage}): {message}")]
    MalformedDocument { stage: &'static str, message: String },

    #[error("No content found to translate")]
    EmptyDocument,

    #[error("Failed to translate content: {0}")]
    TranslationFailed(TranslationError),

    #[error("Content store unavailable: {0}")]
    StoreUnavailable(String),
}

impl PipelineError {
    /// Stage name used in logs.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "validate",
            Self::Configuration(_) => "configuration",
            Self::NotFound { .. } | Self::StoreUnavailable(_) => "store",
            Self::MalformedDocument { stage, .. } => *stage,
            Self::EmptyDocument => "decode",
            Self::TranslationFailed(_) => "translate_body",
        }
    }

    fn from_store(err: StoreError, key: &str) -> Self {
        match err {
            StoreError::Configuration(var) => Self::Configuration(var),
            StoreError::NotFound(_) => Self::NotFound {
                file_name: key.to_string(),
            },
            StoreError::Conflict(_) | StoreError::Unavailable(_) => {
                Self::StoreUnavailable(err.to_string())
            }
        }
    }

    fn from_translation(err: TranslationError) -> Self {
        match err {
            TranslationError::Configuration(var) => Self::Configuration(var),
            other => Self::TranslationFailed(other),
        }
    }
}

/// A completed translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub target: Language,
    pub article: PublishedArticle,
    /// Why the metadata was published untranslated, if it was.
    pub metadata_degraded: Option<String>,
}

/// Validated `(slug, targetLang)` pair.
fn validate(
    slug: Option<&str>,
    target_lang: Option<&str>,
) -> Result<(String, Language), PipelineError> {
    let (slug, target_lang) = match (
        slug.filter(|s| !s.is_empty()),
        target_lang.filter(|l| !l.is_empty()),
    ) {
        (Some(slug), Some(target_lang)) => (slug, target_lang),
        _ => {
            return Err(PipelineError::InvalidRequest {
                message: "Missing slug or targetLang".to_string(),
                received: Some(json!({ "slug": slug, "targetLang": target_lang })),
            })
        }
    };

    let target = Language::from_code(target_lang)
        .ok()
        .filter(|lang| !lang.is_canonical())
        .ok_or_else(|| {
            let codes: Vec<_> = Language::translation_targets()
                .iter()
                .map(|lang| lang.code())
                .collect();
            PipelineError::InvalidRequest {
                message: format!("Invalid target language. Use: {}", codes.join(", ")),
                received: Some(json!(target_lang)),
            }
        })?;

    if !is_valid_slug(slug) {
        return Err(PipelineError::InvalidRequest {
            message: "Invalid slug. Use lowercase letters, digits, '-' and '_'".to_string(),
            received: Some(json!(slug)),
        });
    }

    Ok((slug.to_string(), target))
}

/// Translates source articles and publishes them under their locale key.
pub struct TranslationPipeline {
    store: Arc<dyn ContentStore>,
    engine: TranslationEngine,
    publisher: Publisher,
}

impl TranslationPipeline {
    pub fn new(store: Arc<dyn ContentStore>, engine: TranslationEngine) -> Self {
        Self {
            publisher: Publisher::new(store.clone()),
            store,
            engine,
        }
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    pub async fn translate(
        &self,
        slug: Option<&str>,
        target_lang: Option<&str>,
    ) -> Result<TranslationOutcome, PipelineError> {
        let result = self.run(slug, target_lang).await;
        if let Err(e) = &result {
            let slug = slug.unwrap_or_default();
            let target_lang = target_lang.unwrap_or_default();
            match e {
                PipelineError::InvalidRequest { .. } | PipelineError::NotFound { .. } => {
                    warn!(slug = %slug, target_lang = %target_lang, stage = e.stage(), error = %e, "Translation request rejected")
                }
                _ => {
                    error!(slug = %slug, target_lang = %target_lang, stage = e.stage(), error = %e, "Translation failed")
                }
            }
        }
        result
    }

    async fn run(
        &self,
        slug: Option<&str>,
        target_lang: Option<&str>,
    ) -> Result<TranslationOutcome, PipelineError> {
        let (slug, target) = validate(slug, target_lang)?;

        self.store
            .check_configured()
            .map_err(|e| PipelineError::from_store(e, &slug))?;
        self.engine
            .check_configured()
            .map_err(PipelineError::from_translation)?;

        let source_key = ArticleKey::new(slug.as_str(), Language::canonical()).storage_key();
        info!(slug = %slug, target_lang = %target, file_name = %source_key, "Reading source article");

        let raw = self
            .store
            .read(&source_key)
            .await
            .map_err(|e| PipelineError::from_store(e, &source_key))?;

        let document =
            frontmatter::decode(&raw).map_err(|e| PipelineError::MalformedDocument {
                stage: "decode",
                message: e.to_string(),
            })?;
        let body = document
            .require_body()
            .map_err(|_| PipelineError::EmptyDocument)?;

        let translated_body = self
            .engine
            .translate_body(body, target)
            .await
            .map_err(PipelineError::from_translation)?;

        let outcome = self
            .engine
            .translate_metadata(&document.metadata, target)
            .await;
        let metadata_degraded = outcome.degraded_reason().map(str::to_string);
        let mut metadata = outcome.into_metadata();

        if metadata.translation_group_id.is_none() {
            metadata.translation_group_id = Some(slug.clone());
        }

        let target_key = ArticleKey::new(slug.as_str(), target).storage_key();
        let article = self
            .publisher
            .publish(&slug, target, metadata, &translated_body)
            .await
            .map_err(|e| match e {
                PublishError::Codec(e) => PipelineError::MalformedDocument {
                    stage: "encode",
                    message: e.to_string(),
                },
                PublishError::Store(e) => PipelineError::from_store(e, &target_key),
            })?;

        info!(
            slug = %slug,
            target_lang = %target,
            url = %article.url,
            degraded = metadata_degraded.is_some(),
            "Translation completed"
        );

        Ok(TranslationOutcome {
            target,
            article,
            metadata_degraded,
        })
    }
}
