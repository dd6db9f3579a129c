use anyhow::{bail, Result};
use std::fmt;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_BLOB_API_URL: &str = "https://blob.vercel-storage.com";
pub const DEFAULT_SITE_URL: &str = "https://yourbusinessinitaly.com";

/// Process-wide configuration, read once at start-up and handed to the
/// components that need it.
///
/// Credentials are optional: the server starts without them and answers
/// translation requests with a configuration error naming the variable.
#[derive(Clone)]
pub struct Config {
    // OpenAI
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,

    // Blob storage
    pub blob_read_write_token: Option<String>,
    pub blob_api_url: String,

    // HTTP server
    pub port: u16,

    // Static site generation
    pub site_url: String,
    pub content_dir: String,
    pub dist_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            // OpenAI
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_model: non_empty_var("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_api_url: non_empty_var("OPENAI_API_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string()),

            // Blob storage
            blob_read_write_token: non_empty_var("BLOB_READ_WRITE_TOKEN"),
            blob_api_url: non_empty_var("BLOB_API_URL")
                .unwrap_or_else(|| DEFAULT_BLOB_API_URL.to_string()),

            // HTTP server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // Static site generation
            site_url: non_empty_var("SITE_URL")
                .map(|url| normalize_site_url(&url))
                .transpose()?
                .unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
            content_dir: non_empty_var("CONTENT_DIR")
                .unwrap_or_else(|| "content/blog".to_string()),
            dist_dir: non_empty_var("DIST_DIR").unwrap_or_else(|| "dist/public".to_string()),
        };

        Ok(config)
    }
}

/// Checks that a site URL is absolute http(s) and drops its trailing `/`.
///
/// Used for `SITE_URL` and for any command-line override of it.
pub fn normalize_site_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if !url.starts_with("http://") && !url.starts_with("https://") {
        bail!("SITE_URL must be an absolute http(s) URL, got '{}'", url);
    }
    Ok(url.to_string())
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn redact(secret: &Option<String>) -> &'static str {
    match secret {
        Some(_) => "<set>",
        None => "<unset>",
    }
}

// Credentials must never reach the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("openai_model", &self.openai_model)
            .field("openai_api_url", &self.openai_api_url)
            .field(
                "blob_read_write_token",
                &redact(&self.blob_read_write_token),
            )
            .field("blob_api_url", &self.blob_api_url)
            .field("port", &self.port)
            .field("site_url", &self.site_url)
            .field("content_dir", &self.content_dir)
            .field("dist_dir", &self.dist_dir)
            .finish()
    }
}
