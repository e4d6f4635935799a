//! Repository port for message log rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::identity::domain::ConversationId;
use crate::message::domain::Message;
use crate::store::StoreResult;

/// Persistence contract for the message log.
///
/// One partition per conversation; rows are clustered newest-first by
/// `(sent_at DESC, id ASC)` and reads may only scan the head of that order
/// under a row limit. The store offers no native offset — offset semantics
/// belong to the service layer, which over-fetches and slices.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Appends one message row.
    ///
    /// # Errors
    ///
    /// Returns a store error when the write cannot be served.
    async fn append(&self, message: &Message) -> StoreResult<()>;

    /// Returns up to `fetch_limit` rows from the head of the partition, in
    /// clustering order.
    ///
    /// Returns an empty vector for a conversation with no messages.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read cannot be served.
    async fn newest(
        &self,
        conversation: ConversationId,
        fetch_limit: u64,
    ) -> StoreResult<Vec<Message>>;

    /// Like [`MessageStore::newest`], restricted to rows strictly older
    /// than `before`.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read cannot be served.
    async fn newest_before(
        &self,
        conversation: ConversationId,
        before: DateTime<Utc>,
        fetch_limit: u64,
    ) -> StoreResult<Vec<Message>>;
}
