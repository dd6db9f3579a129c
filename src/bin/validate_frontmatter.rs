//! Check every article in the content directory for a readable metadata
//! block and the editorial fields the site relies on.
//!
//! Usage:
//!   cargo run --bin validate-frontmatter
//!   cargo run --bin validate-frontmatter -- content/blog
//!
//! Exits 1 when any document cannot be decoded. Missing fields are only
//! reported as warnings.

use anyhow::{bail, Context, Result};
use content_pipeline::article::DOCUMENT_EXTENSION;
use content_pipeline::config::Config;
use content_pipeline::frontmatter;
use content_pipeline::store::{ContentStore, DirectoryStore};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("content_pipeline=info".parse()?),
        )
        .init();

    let root = match std::env::args().nth(1) {
        Some(dir) => dir,
        None => Config::from_env()?.content_dir,
    };
    if !Path::new(&root).is_dir() {
        bail!("Blog directory not found: {}", root);
    }

    let store = DirectoryStore::new(&root);
    let objects = store.list().await.context("Failed to list blog directory")?;

    let mut valid = 0;
    let mut issues = Vec::new();

    for object in objects
        .iter()
        .filter(|object| object.key.ends_with(DOCUMENT_EXTENSION))
    {
        let raw = store
            .read(&object.key)
            .await
            .with_context(|| format!("Failed to read {}", object.key))?;

        match frontmatter::decode(&raw) {
            Ok(document) => {
                valid += 1;
                let missing = document.metadata.missing_fields();
                if !missing.is_empty() {
                    println!("⚠️  {}: missing {}", object.key, missing.join(", "));
                }
            }
            Err(e) => {
                println!("❌ {}: {}", object.key, e);
                issues.push((object.key.clone(), e));
            }
        }
    }

    println!("\n=== VALIDATION SUMMARY ===");
    println!("✅ Valid: {}", valid);
    println!("❌ Invalid: {}", issues.len());

    if issues.is_empty() {
        println!("\n✨ All frontmatter is valid!");
        return Ok(());
    }

    println!("\n=== CRITICAL ISSUES ===");
    for (file, error) in &issues {
        println!("  {}: {}", file, error);
    }
    std::process::exit(1);
}
