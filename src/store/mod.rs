//! Content store: keyed article documents in a blob backend.
//!
//! Production runs against the hosted blob service ([`BlobStore`]); the
//! site generator and local development read a content directory
//! ([`DirectoryStore`]); tests use [`MemoryStore`].

mod blob;
mod directory;
mod memory;

pub use blob::BlobStore;
pub use directory::DirectoryStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A required credential is missing. Carries the variable name.
    #[error("{0} is not configured")]
    Configuration(&'static str),

    #[error("document not found: {0}")]
    NotFound(String),

    #[error("document already exists: {0}")]
    Conflict(String),

    #[error("content store unavailable: {0}")]
    Unavailable(String),
}

/// How a document is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub public: bool,
    pub overwrite: bool,
}

impl WriteOptions {
    /// Publicly readable, replacing whatever is stored under the key.
    pub const PUBLISH: WriteOptions = WriteOptions {
        public: true,
        overwrite: true,
    };
}

/// One entry of the store index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
    pub size: u64,
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fail fast when the store cannot be used at all.
    fn check_configured(&self) -> Result<(), StoreError>;

    /// Content of the document stored under exactly `key`.
    async fn read(&self, key: &str) -> Result<String, StoreError>;

    /// Store `content` under `key` and return its public URL.
    ///
    /// The key is used verbatim; no random suffix is ever added.
    async fn write(
        &self,
        key: &str,
        content: &str,
        options: WriteOptions,
    ) -> Result<String, StoreError>;

    /// Every object in the store.
    async fn list(&self) -> Result<Vec<StoredObject>, StoreError>;

    /// Content of an object returned by [`list`](Self::list).
    ///
    /// Backends that can fetch the object directly override this to skip
    /// the key lookup.
    async fn read_object(&self, object: &StoredObject) -> Result<String, StoreError> {
        self.read(&object.key).await
    }
}
