use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// A resolved destination identifier for one track signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    pub signature: String,
    #[serde(rename = "youtubeId")]
    pub resolved_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Persistent signature to identifier mapping shared across runs.
///
/// `store` is an idempotent insert: storing a signature that is already present leaves the
/// existing record untouched and is not an error.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn lookup(&self, signature: &str) -> Result<Option<String>>;

    async fn store(&self, record: CacheRecord) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheDocument {
    #[serde(default)]
    songs: Vec<CacheRecord>,
}

/// Cache kept as a single JSON document on disk.
///
/// Every lookup re-reads the file. Writes within this process are serialized, concurrent
/// processes are not coordinated and the last writer wins.
#[derive(Debug)]
pub struct JsonFileCache {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn records(&self) -> Result<Vec<CacheRecord>> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.songs)
    }

    async fn read(&self) -> Result<CacheDocument> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(CacheDocument::default()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read cache: {}", self.path.display()));
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(CacheDocument::default());
        }
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse cache: {}", self.path.display()))
    }

    /// Writes to a uniquely named file next to the cache, then renames it over the cache
    async fn write(&self, document: &CacheDocument) -> Result<()> {
        let parent = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => parent.to_path_buf(),
            None => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&parent)
            .await
            .with_context(|| format!("Failed to create cache directory: {}", parent.display()))?;
        let contents = serde_json::to_vec_pretty(document)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut file = tempfile::NamedTempFile::new_in(&parent).with_context(|| {
                format!("Failed to create temporary cache file in {}", parent.display())
            })?;
            file.write_all(&contents)
                .with_context(|| format!("Failed to write cache: {}", file.path().display()))?;
            file.persist(&path)
                .with_context(|| format!("Failed to replace cache: {}", path.display()))?;
            Ok(())
        })
        .await
        .context("Cache writer task failed")?
    }
}

#[async_trait]
impl CacheStore for JsonFileCache {
    async fn lookup(&self, signature: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let document = self.read().await?;
        Ok(document
            .songs
            .into_iter()
            .find(|record| record.signature == signature)
            .map(|record| record.resolved_id))
    }

    async fn store(&self, record: CacheRecord) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        if document
            .songs
            .iter()
            .any(|existing| existing.signature == record.signature)
        {
            return Ok(());
        }
        tracing::debug!(signature = %record.signature, id = %record.resolved_id, "caching resolved id");
        document.songs.push(record);
        self.write(&document).await
    }
}

/// Cache that lives only as long as the process, used by `--no-cache` runs.
#[derive(Debug, Default)]
pub struct MemoryCache {
    records: Mutex<HashMap<String, CacheRecord>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn lookup(&self, signature: &str) -> Result<Option<String>> {
        Ok(self
            .records
            .lock()
            .await
            .get(signature)
            .map(|record| record.resolved_id.clone()))
    }

    async fn store(&self, record: CacheRecord) -> Result<()> {
        self.records
            .lock()
            .await
            .entry(record.signature.clone())
            .or_insert(record);
        Ok(())
    }
}
