//! In-memory implementation of the `MessageStore` port.
//!
//! One vector per conversation partition; reads sort with the clustering
//! comparator and truncate to the fetch limit, mirroring a head scan.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::identity::domain::ConversationId;
use crate::message::domain::Message;
use crate::message::ports::repository::MessageStore;
use crate::store::{StoreResult, StoreUnavailableError};

/// In-memory implementation of [`MessageStore`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryMessageStore {
    partitions: Arc<RwLock<HashMap<ConversationId, Vec<Message>>>>,
}

impl InMemoryMessageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of messages stored for a conversation.
    #[must_use]
    pub fn partition_len(&self, conversation: ConversationId) -> usize {
        self.partitions
            .read()
            .map(|guard| guard.get(&conversation).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn head(
        &self,
        conversation: ConversationId,
        fetch_limit: u64,
        cutoff: Option<DateTime<Utc>>,
    ) -> StoreResult<Vec<Message>> {
        let guard = self.partitions.read().map_err(poisoned)?;
        let mut rows: Vec<Message> = guard
            .get(&conversation)
            .map(|partition| {
                partition
                    .iter()
                    .filter(|m| cutoff.is_none_or(|before| m.sent_at() < before))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        rows.sort_by(Message::newest_first);
        rows.truncate(usize::try_from(fetch_limit).unwrap_or(usize::MAX));
        Ok(rows)
    }
}

fn poisoned(e: impl std::fmt::Display) -> StoreUnavailableError {
    StoreUnavailableError::connection(format!("lock poisoned: {e}"))
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: &Message) -> StoreResult<()> {
        let mut guard = self.partitions.write().map_err(poisoned)?;
        guard
            .entry(message.conversation_id())
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn newest(
        &self,
        conversation: ConversationId,
        fetch_limit: u64,
    ) -> StoreResult<Vec<Message>> {
        self.head(conversation, fetch_limit, None)
    }

    async fn newest_before(
        &self,
        conversation: ConversationId,
        before: DateTime<Utc>,
        fetch_limit: u64,
    ) -> StoreResult<Vec<Message>> {
        self.head(conversation, fetch_limit, Some(before))
    }
}
