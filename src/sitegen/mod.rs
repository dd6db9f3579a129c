//! Post-build generator for localized page shells and sitemaps.
//!
//! Runs once after the frontend build. The shared `index.html` template is
//! copied into one shell per (locale, section) and one per article, each with
//! its own title, description, canonical and hreflang links, and the
//! per-locale sitemaps are written next to them.

mod head;
mod routes;
mod sitemap;

pub use head::{escape, inject_head, Alternate, HeadTags};
pub use routes::{all_routes, localized_path, Route, Section};
pub use sitemap::{render_index, render_urlset, UrlEntry};

use crate::article::{is_valid_slug, parse_article_date, ArticleKey};
use crate::frontmatter::{self, Frontmatter};
use crate::i18n::Language;
use crate::store::{ContentStore, StoreError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

const TEMPLATE_FILE: &str = "index.html";
const X_DEFAULT: &str = "x-default";

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("page template not found: {}", .0.display())]
    MissingTemplate(PathBuf),

    #[error("page template {} has no </head> tag", .0.display())]
    MissingHead(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to enumerate articles: {0}")]
    Content(#[from] StoreError),
}

/// Where the generator is in its single pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    Idle,
    EnumerateRoutes,
    EnumerateArticles,
    EmitBaseShells,
    EmitArticleShells,
    EmitSitemaps,
    Done,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorReport {
    pub pages_written: usize,
    pub articles_processed: usize,
    pub articles_skipped: usize,
    pub sitemaps_written: usize,
}

#[derive(Debug, Clone)]
struct ArticlePage {
    key: ArticleKey,
    metadata: Frontmatter,
    group: String,
}

impl ArticlePage {
    fn new(key: ArticleKey, metadata: Frontmatter) -> Self {
        let group = metadata
            .translation_group_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(key.slug.as_str())
            .to_lowercase();
        Self {
            key,
            metadata,
            group,
        }
    }
}

pub struct SiteGenerator {
    site_url: String,
    dist_dir: PathBuf,
    content: Arc<dyn ContentStore>,
    state: GeneratorState,
}

impl SiteGenerator {
    pub fn new(
        site_url: impl Into<String>,
        dist_dir: impl Into<PathBuf>,
        content: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            site_url: site_url.into().trim_end_matches('/').to_string(),
            dist_dir: dist_dir.into(),
            content,
            state: GeneratorState::Idle,
        }
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Run every stage once and report what was written.
    ///
    /// A missing template or an unreadable content index stops the run; a
    /// single article that cannot be read, decoded or written is skipped.
    pub async fn run(&mut self) -> Result<GeneratorReport, SiteError> {
        let mut report = GeneratorReport::default();
        let mut template = String::new();
        let mut routes = Vec::new();
        let mut articles = Vec::new();

        self.state = GeneratorState::Idle;
        loop {
            let next = match self.state {
                GeneratorState::Idle => {
                    template = self.load_template().await?;
                    GeneratorState::EnumerateRoutes
                }
                GeneratorState::EnumerateRoutes => {
                    routes = all_routes();
                    GeneratorState::EnumerateArticles
                }
                GeneratorState::EnumerateArticles => {
                    articles = self.load_articles(&mut report).await?;
                    GeneratorState::EmitBaseShells
                }
                GeneratorState::EmitBaseShells => {
                    for route in &routes {
                        self.write_base_shell(&template, route).await?;
                        report.pages_written += 1;
                    }
                    GeneratorState::EmitArticleShells
                }
                GeneratorState::EmitArticleShells => {
                    let groups = group_index(&articles);
                    for article in &articles {
                        let alternates = self.article_alternates(article, &articles, &groups);
                        match self.write_article_shell(&template, article, alternates).await {
                            Ok(()) => report.articles_processed += 1,
                            Err(e) => {
                                warn!(slug = %article.key.slug, lang = %article.key.lang, error = %e, "Skipping article shell");
                                report.articles_skipped += 1;
                            }
                        }
                    }
                    GeneratorState::EmitSitemaps
                }
                GeneratorState::EmitSitemaps => {
                    report.sitemaps_written = self.write_sitemaps(&routes, &articles).await?;
                    GeneratorState::Done
                }
                GeneratorState::Done => break,
            };
            debug!(from = ?self.state, to = ?next, "Generator stage complete");
            self.state = next;
        }

        info!(
            pages = report.pages_written,
            articles = report.articles_processed,
            skipped = report.articles_skipped,
            sitemaps = report.sitemaps_written,
            "Site generation finished"
        );
        Ok(report)
    }

    async fn load_template(&self) -> Result<String, SiteError> {
        let path = self.dist_dir.join(TEMPLATE_FILE);
        let template = match tokio::fs::read_to_string(&path).await {
            Ok(template) => template,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SiteError::MissingTemplate(path))
            }
            Err(source) => return Err(SiteError::Read { path, source }),
        };

        if inject_head(&template, &HeadTags::default()).is_none() {
            return Err(SiteError::MissingHead(path));
        }
        Ok(template)
    }

    async fn load_articles(
        &self,
        report: &mut GeneratorReport,
    ) -> Result<Vec<ArticlePage>, SiteError> {
        let mut articles = Vec::new();

        for object in self.content.list().await? {
            let Some(key) = ArticleKey::parse(&object.key) else {
                continue;
            };
            if !is_valid_slug(&key.slug) {
                warn!(file_name = %object.key, stage = "enumerate", "Skipping article with a slug that is not URL-safe");
                report.articles_skipped += 1;
                continue;
            }

            let raw = match self.content.read_object(&object).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(file_name = %object.key, stage = "read", error = %e, "Skipping article");
                    report.articles_skipped += 1;
                    continue;
                }
            };
            match frontmatter::decode(&raw) {
                Ok(document) => articles.push(ArticlePage::new(key, document.metadata)),
                Err(e) => {
                    warn!(file_name = %object.key, stage = "decode", error = %e, "Skipping article");
                    report.articles_skipped += 1;
                }
            }
        }

        debug!(count = articles.len(), "Loaded articles");
        Ok(articles)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.site_url, path)
    }

    fn article_url(&self, key: &ArticleKey) -> String {
        self.url(&localized_path(key.lang, &format!("/blog/{}", key.slug)))
    }

    /// Canonical, one alternate per locale and `x-default` for a base page.
    fn route_alternates(&self, section: Section) -> Vec<Alternate> {
        let mut alternates: Vec<_> = Language::all()
            .into_iter()
            .map(|lang| Alternate {
                hreflang: lang.code().to_string(),
                href: self.url(&localized_path(lang, section.path())),
            })
            .collect();
        alternates.push(Alternate {
            hreflang: X_DEFAULT.to_string(),
            href: self.url(&localized_path(Language::canonical(), section.path())),
        });
        alternates
    }

    /// Alternates for an article: only locales that actually have a
    /// sibling, and `x-default` only when the source-language one exists.
    /// Empty when the article has no sibling at all.
    fn article_alternates(
        &self,
        article: &ArticlePage,
        articles: &[ArticlePage],
        groups: &HashMap<&str, Vec<usize>>,
    ) -> Vec<Alternate> {
        let members: Vec<&ArticlePage> = groups
            .get(article.group.as_str())
            .map(|indices| indices.iter().map(|&i| &articles[i]).collect())
            .unwrap_or_default();

        if !members.iter().any(|m| m.key.lang != article.key.lang) {
            return Vec::new();
        }

        let mut alternates = Vec::new();
        let mut x_default = None;
        for lang in Language::all() {
            let member = if lang == article.key.lang {
                Some(article)
            } else {
                members.iter().copied().find(|m| m.key.lang == lang)
            };
            let Some(member) = member else {
                continue;
            };

            let href = self.article_url(&member.key);
            if lang.is_canonical() {
                x_default = Some(href.clone());
            }
            alternates.push(Alternate {
                hreflang: lang.code().to_string(),
                href,
            });
        }

        if let Some(href) = x_default {
            alternates.push(Alternate {
                hreflang: X_DEFAULT.to_string(),
                href,
            });
        }
        alternates
    }

    async fn write_base_shell(&self, template: &str, route: &Route) -> Result<(), SiteError> {
        let strings = &route.lang.config().strings;
        let tags = HeadTags {
            title: Some(route.section.title(strings).to_string()),
            description: Some(route.section.description(strings).to_string()),
            canonical: self.url(&route.path()),
            alternates: self.route_alternates(route.section),
        };

        let path = self.dist_dir.join(route.output_dir()).join(TEMPLATE_FILE);
        let html = inject_head(template, &tags)
            .ok_or_else(|| SiteError::MissingHead(self.dist_dir.join(TEMPLATE_FILE)))?;
        write_file(&path, &html).await
    }

    async fn write_article_shell(
        &self,
        template: &str,
        article: &ArticlePage,
        alternates: Vec<Alternate>,
    ) -> Result<(), SiteError> {
        let tags = HeadTags {
            title: article.metadata.page_title().map(str::to_string),
            description: article.metadata.page_description().map(str::to_string),
            canonical: self.article_url(&article.key),
            alternates,
        };

        let path = self
            .dist_dir
            .join(article.key.lang.code())
            .join("blog")
            .join(&article.key.slug)
            .join(TEMPLATE_FILE);
        let html = inject_head(template, &tags)
            .ok_or_else(|| SiteError::MissingHead(self.dist_dir.join(TEMPLATE_FILE)))?;
        write_file(&path, &html).await
    }

    /// One urlset per locale plus the index. Returns the number of files.
    async fn write_sitemaps(
        &self,
        routes: &[Route],
        articles: &[ArticlePage],
    ) -> Result<usize, SiteError> {
        let groups = group_index(articles);
        let mut index = Vec::new();

        for lang in Language::all() {
            let mut entries: Vec<UrlEntry> = routes
                .iter()
                .filter(|route| route.lang == lang)
                .map(|route| UrlEntry {
                    loc: self.url(&route.path()),
                    lastmod: None,
                    changefreq: route.section.changefreq(),
                    priority: route.section.priority(),
                    alternates: self.route_alternates(route.section),
                })
                .collect();

            entries.extend(
                articles
                    .iter()
                    .filter(|article| article.key.lang == lang)
                    .map(|article| UrlEntry {
                        loc: self.article_url(&article.key),
                        lastmod: article
                            .metadata
                            .date
                            .as_deref()
                            .and_then(parse_article_date)
                            .map(|date| date.date_naive()),
                        changefreq: "weekly",
                        priority: "0.8",
                        alternates: self.article_alternates(article, articles, &groups),
                    }),
            );

            let file_name = format!("sitemap-{}.xml", lang.code());
            write_file(&self.dist_dir.join(&file_name), &render_urlset(&entries)).await?;
            index.push(self.url(&format!("/{}", file_name)));
        }

        write_file(&self.dist_dir.join("sitemap.xml"), &render_index(&index)).await?;
        Ok(index.len() + 1)
    }
}

/// Article indices by translation group.
fn group_index(articles: &[ArticlePage]) -> HashMap<&str, Vec<usize>> {
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, article) in articles.iter().enumerate() {
        groups.entry(article.group.as_str()).or_default().push(i);
    }
    groups
}

async fn write_file(path: &Path, contents: &str) -> Result<(), SiteError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| SiteError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| SiteError::Write {
            path: path.to_path_buf(),
            source,
        })
}
