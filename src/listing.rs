//! Published article index for one locale.

use crate::article::{parse_article_date, ArticleKey};
use crate::frontmatter;
use crate::i18n::Language;
use crate::store::{ContentStore, StoreError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

const DEFAULT_CATEGORY: &str = "Generale";
const DEFAULT_AUTHOR: &str = "Redazione";

/// Card data for the blog index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub slug: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub excerpt: String,
    pub cover_image: String,
    pub author: String,
}

fn trimmed_or(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Articles published in `lang`, newest first.
///
/// Documents that cannot be read or decoded, or that have no title or no
/// parseable date, are left out.
pub async fn list_articles(
    store: &dyn ContentStore,
    lang: Language,
) -> Result<Vec<ArticleSummary>, StoreError> {
    let objects = store.list().await?;

    let mut articles = Vec::new();
    for object in objects {
        let Some(key) = ArticleKey::parse(&object.key) else {
            continue;
        };
        if key.lang != lang {
            continue;
        }

        let raw = match store.read_object(&object).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(file_name = %object.key, error = %e, "Skipping unreadable article");
                continue;
            }
        };
        let metadata = match frontmatter::decode(&raw) {
            Ok(document) => document.metadata,
            Err(e) => {
                warn!(file_name = %object.key, error = %e, "Skipping malformed article");
                continue;
            }
        };

        let title = metadata.title.as_deref().map(str::trim).unwrap_or_default();
        let date = match metadata.date.as_deref().and_then(parse_article_date) {
            Some(date) if !title.is_empty() => date,
            _ => {
                debug!(file_name = %object.key, "Skipping article without title or date");
                continue;
            }
        };

        articles.push(ArticleSummary {
            slug: key.slug,
            title: title.to_string(),
            date,
            category: trimmed_or(metadata.category.as_deref(), DEFAULT_CATEGORY),
            excerpt: trimmed_or(metadata.excerpt.as_deref(), ""),
            cover_image: trimmed_or(metadata.cover_image.as_deref(), ""),
            author: trimmed_or(metadata.author.as_deref(), DEFAULT_AUTHOR),
        });
    }

    articles.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(articles)
}
