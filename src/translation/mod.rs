//! Article translation through an LLM text generator.
//!
//! The body and the metadata are translated with different guarantees:
//! a body failure aborts the request, a metadata failure degrades to the
//! source values. Lead-magnet copy never goes through the generator.

mod engine;
mod format;
mod lead_magnet;
mod openai;

pub use engine::{MetadataOutcome, TranslationEngine};
pub use format::{FieldFormat, PositionalLines};
pub use lead_magnet::{LeadMagnetCopy, LeadMagnetOverrides};
pub use openai::OpenAiClient;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// A required credential is missing. Carries the variable name.
    #[error("{0} is not configured")]
    Configuration(&'static str),

    #[error("translation request failed: {0}")]
    Request(String),

    #[error("translation service error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("translation service returned no content")]
    Empty,
}

/// Chat-style text generation: one system prompt, one user message.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Fail fast when the generator cannot be used at all.
    fn check_configured(&self) -> Result<(), TranslationError>;

    /// Generated text. Never blank on success.
    async fn generate(&self, system: &str, user: &str) -> Result<String, TranslationError>;
}
