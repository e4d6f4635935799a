//! Repository port for conversation feed rows.

use async_trait::async_trait;

use crate::feed::domain::FeedEntry;
use crate::identity::domain::UserId;
use crate::store::StoreResult;

/// Persistence contract for the conversation feed.
///
/// One partition per user, ranked `(last_updated_at DESC, conversation
/// ASC)`. Pushing an entry inserts a newer-ranked row; rows sharing the full
/// ranking key follow last-write-wins, matching the store's
/// clustering-key semantics. Older rows for the same conversation are
/// shadowed, not removed.
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Inserts one feed row.
    ///
    /// # Errors
    ///
    /// Returns a store error when the write cannot be served.
    async fn push(&self, entry: &FeedEntry) -> StoreResult<()>;

    /// Returns up to `fetch_limit` rows from the head of the user's feed,
    /// in ranking order.
    ///
    /// Returns an empty vector for a user with no conversations.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read cannot be served.
    async fn newest(&self, user: UserId, fetch_limit: u64) -> StoreResult<Vec<FeedEntry>>;
}
