//! Multilingual MDX content pipeline.
//!
//! Italian source articles live in a blob store as `{slug}.mdx`. The server
//! translates them on request into the other supported locales and publishes
//! `{slug}.{lang}.mdx` siblings; the `generate-site` binary turns the built
//! frontend into localized page shells and sitemaps.

pub mod article;
pub mod config;
pub mod frontmatter;
pub mod i18n;
pub mod listing;
pub mod pipeline;
pub mod publisher;
pub mod server;
pub mod sitegen;
pub mod store;
pub mod translation;
