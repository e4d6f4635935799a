//! Repository port for conversation membership rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::conversation::domain::ParticipantSet;
use crate::identity::domain::{ConversationId, UserId};
use crate::store::StoreResult;

/// Persistence contract for the participant registry.
///
/// Membership lives in a single partition per conversation, clustered by
/// user identifier.
///
/// # Implementation Notes
///
/// - `(conversation, user)` rows are write-once: re-inserting must keep the
///   original `joined_at` and succeed silently.
/// - There is no cross-partition uniqueness constraint; idempotence comes
///   from the deterministic conversation identifier, not the store.
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Records membership of every participant, skipping rows that already
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns a store error when the write cannot be served.
    async fn add_participants(
        &self,
        conversation: ConversationId,
        participants: &ParticipantSet,
        joined_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Returns the recorded membership in user-identifier order.
    ///
    /// Returns an empty vector when the conversation has no recorded
    /// participants.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read cannot be served.
    async fn participants_of(&self, conversation: ConversationId) -> StoreResult<Vec<UserId>>;
}
