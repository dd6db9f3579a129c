//! Post-build step: localized page shells, article shells and sitemaps.
//!
//! Usage:
//!   cargo run --bin generate-site
//!   cargo run --bin generate-site -- --dist dist/public --content content/blog
//!   cargo run --bin generate-site -- --site-url https://staging.example.com
//!
//! Flags override DIST_DIR, CONTENT_DIR and SITE_URL. A missing
//! `index.html` in the dist directory is logged and skipped so a partial
//! build does not fail the pipeline.

use anyhow::{bail, Context, Result};
use content_pipeline::config::{normalize_site_url, Config};
use content_pipeline::sitegen::{SiteError, SiteGenerator};
use content_pipeline::store::DirectoryStore;
use std::sync::Arc;
use tracing::{error, info};

struct Args {
    dist: Option<String>,
    content: Option<String>,
    site_url: Option<String>,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Args {
            dist: None,
            content: None,
            site_url: None,
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let slot = match arg.as_str() {
                "--dist" => &mut parsed.dist,
                "--content" => &mut parsed.content,
                "--site-url" => &mut parsed.site_url,
                other => bail!("Unknown argument '{}'", other),
            };
            let value = args
                .next()
                .with_context(|| format!("{} requires a value", arg))?;
            *slot = Some(value);
        }

        Ok(parsed)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("content_pipeline=info".parse()?),
        )
        .init();

    let args = Args::parse(std::env::args().skip(1))?;
    let config = Config::from_env()?;

    let dist = args.dist.unwrap_or(config.dist_dir);
    let content = args.content.unwrap_or(config.content_dir);
    let site_url = match args.site_url {
        Some(url) => normalize_site_url(&url)?,
        None => config.site_url,
    };

    info!(dist = %dist, content = %content, site_url = %site_url, "Generating static heads");

    let store = Arc::new(DirectoryStore::new(&content));
    let mut generator = SiteGenerator::new(site_url, &dist, store);

    match generator.run().await {
        Ok(report) => {
            info!(
                "Wrote {} pages and {} article shells ({} skipped), {} sitemaps",
                report.pages_written,
                report.articles_processed,
                report.articles_skipped,
                report.sitemaps_written
            );
            Ok(())
        }
        Err(SiteError::MissingTemplate(path)) => {
            error!("{} not found, skipping head generation", path.display());
            Ok(())
        }
        Err(e) => Err(e).context("Static head generation failed"),
    }
}
