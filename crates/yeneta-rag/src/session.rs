//! Session store implementations

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;

use yeneta_core::{ConversationRecord, Error, Result, SessionStore};

/// Append-only JSON-lines conversation log
pub struct JsonlSessionStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonlSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record back, oldest first
    pub async fn read_records(&self) -> Result<Vec<ConversationRecord>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::SessionStore(e.to_string())),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Error::from))
            .collect()
    }
}

#[async_trait]
impl SessionStore for JsonlSessionStore {
    async fn append(&self, record: &ConversationRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                Error::SessionStore(format!("cannot open {}: {}", self.path.display(), e))
            })?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| Error::SessionStore(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| Error::SessionStore(e.to_string()))?;

        Ok(())
    }
}

/// Session store that keeps records in memory for the lifetime of the process
#[derive(Default)]
pub struct InMemorySessionStore {
    records: Mutex<Vec<ConversationRecord>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Result<Vec<ConversationRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|e| Error::SessionStore(format!("Lock error: {}", e)))?;
        Ok(records.clone())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn append(&self, record: &ConversationRecord) -> Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| Error::SessionStore(format!("Lock error: {}", e)))?;
        records.push(record.clone());
        Ok(())
    }
}
