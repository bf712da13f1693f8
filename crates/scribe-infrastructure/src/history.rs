//! JSON file history store.
//!
//! The whole collection lives in one pretty-printed JSON array. Writes go
//! to a temporary file in the same directory, are synced, and renamed over
//! the target so readers never observe a torn file. There is no file
//! locking; a single writer is assumed.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use scribe_core::content::{ContentRecord, HistoryRepository};
use scribe_core::error::{Result, ScribeError};

/// File-backed implementation of [`HistoryRepository`].
pub struct JsonHistoryRepository {
    path: PathBuf,
}

impl JsonHistoryRepository {
    /// Creates a repository persisting to `path`.
    ///
    /// Parent directories are created lazily on the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the persisted history file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "content.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl HistoryRepository for JsonHistoryRepository {
    async fn load(&self) -> Result<Vec<ContentRecord>> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "history file not found, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<ContentRecord>>(&content) {
            Ok(records) => {
                tracing::debug!(count = records.len(), "loaded history");
                Ok(records)
            }
            Err(err) => {
                // Fail open: corrupt state degrades to an empty history
                // instead of taking the request path down.
                let corrupt = ScribeError::corrupt_state(format!(
                    "failed to parse history file {}: {err}",
                    self.path.display()
                ));
                tracing::warn!(error = %corrupt, "degrading to empty history");
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, records: &[ContentRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(records)
            .map_err(|err| ScribeError::persist(format!("failed to serialize history: {err}")))?;

        let tmp_path = self.temp_path();
        let mut tmp_file = File::create(&tmp_path).await?;
        tmp_file.write_all(json.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(count = records.len(), path = %self.path.display(), "saved history");
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<Vec<ContentRecord>> {
        let mut records = self.load().await?;
        let original_len = records.len();
        records.retain(|record| record.id != id);

        if records.len() == original_len {
            tracing::warn!(id, "record not found in history, nothing removed");
            return Ok(records);
        }

        self.save(&records).await?;
        tracing::info!(id, "removed record from history");
        Ok(records)
    }
}
