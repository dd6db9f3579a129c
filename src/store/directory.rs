use crate::store::{ContentStore, StoreError, StoredObject, WriteOptions};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Content store backed by a flat local directory.
///
/// Keys are file names. Writes land in a hidden temporary file first and are
/// renamed into place, so readers never see a half-written document.
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(StoreError::NotFound(key.to_string()));
        }
        Ok(self.root.join(key))
    }

    fn url_for(path: &Path) -> String {
        format!("file://{}", path.display())
    }
}

fn unavailable(action: &str, key: &str, err: std::io::Error) -> StoreError {
    StoreError::Unavailable(format!("failed to {} {}: {}", action, key, err))
}

#[async_trait]
impl ContentStore for DirectoryStore {
    fn check_configured(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<String, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(key.to_string())),
            Err(e) => Err(unavailable("read", key, e)),
        }
    }

    async fn write(
        &self,
        key: &str,
        content: &str,
        options: WriteOptions,
    ) -> Result<String, StoreError> {
        let path = self.path_for(key)?;

        if !options.overwrite && tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StoreError::Conflict(key.to_string()));
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| unavailable("create directory for", key, e))?;

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let temp_path = self
            .root
            .join(format!(".{}.{}-{}.tmp", key, std::process::id(), nanos));

        if let Err(e) = tokio::fs::write(&temp_path, content).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(unavailable("write", key, e));
        }
        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(unavailable("move into place", key, e));
        }

        debug!(key = %key, path = %path.display(), "Wrote document");
        Ok(Self::url_for(&path))
    }

    async fn list(&self) -> Result<Vec<StoredObject>, StoreError> {
        let root = self.root.display().to_string();
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| unavailable("list", &root, e))?;

        let mut objects = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| unavailable("list", &root, e))?
        {
            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                _ => continue,
            };
            let Some(key) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };

            objects.push(StoredObject {
                url: Self::url_for(&entry.path()),
                key,
                size: metadata.len(),
                uploaded_at: metadata.modified().ok().map(DateTime::<Utc>::from),
            });
        }

        // read_dir order is platform dependent
        objects.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(objects)
    }
}
