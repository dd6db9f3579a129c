use crate::article::ArticleKey;
use crate::frontmatter::{CodecError, Document, Frontmatter};
use crate::i18n::Language;
use crate::store::{ContentStore, StoreError, WriteOptions};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Where a translation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedArticle {
    pub url: String,
    pub file_name: String,
}

/// Writes translated documents under their locale key.
pub struct Publisher {
    store: Arc<dyn ContentStore>,
}

impl Publisher {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Encode and store `{slug}.{lang}.mdx`, replacing any earlier version.
    ///
    /// `lang` is stamped into the metadata, so identical input always yields
    /// identical stored bytes.
    pub async fn publish(
        &self,
        slug: &str,
        lang: Language,
        metadata: Frontmatter,
        body: &str,
    ) -> Result<PublishedArticle, PublishError> {
        let mut metadata = metadata;
        metadata.lang = Some(lang.code().to_string());

        let content = Document::new(metadata, body).encode()?;
        let file_name = ArticleKey::new(slug, lang).storage_key();
        let url = self
            .store
            .write(&file_name, &content, WriteOptions::PUBLISH)
            .await?;

        info!(slug = %slug, target_lang = %lang, file_name = %file_name, "Published article");
        Ok(PublishedArticle { url, file_name })
    }
}
