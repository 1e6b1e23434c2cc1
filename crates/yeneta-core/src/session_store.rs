//! Session/progress store trait

use async_trait::async_trait;

use crate::{ConversationRecord, Result};

/// Append-only sink for conversation records
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a record; records are never updated afterwards
    async fn append(&self, record: &ConversationRecord) -> Result<()>;
}
