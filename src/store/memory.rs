use crate::store::{ContentStore, StoreError, StoredObject, WriteOptions};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-process store for tests and local experiments.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<BTreeMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document without counting it as a write.
    pub fn with_document(self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.lock().insert(key.into(), content.into());
        self
    }

    /// Number of successful `write` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current content under `key`, bypassing the trait.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A panic while holding the lock cannot leave the map half-updated
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn url_for(key: &str) -> String {
        format!("memory://{}", key)
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    fn check_configured(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<String, StoreError> {
        self.get(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn write(
        &self,
        key: &str,
        content: &str,
        options: WriteOptions,
    ) -> Result<String, StoreError> {
        let mut documents = self.lock();
        if !options.overwrite && documents.contains_key(key) {
            return Err(StoreError::Conflict(key.to_string()));
        }
        documents.insert(key.to_string(), content.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(Self::url_for(key))
    }

    async fn list(&self) -> Result<Vec<StoredObject>, StoreError> {
        let now = Utc::now();
        Ok(self
            .lock()
            .iter()
            .map(|(key, content)| StoredObject {
                key: key.clone(),
                url: Self::url_for(key),
                size: content.len() as u64,
                uploaded_at: Some(now),
            })
            .collect())
    }
}
