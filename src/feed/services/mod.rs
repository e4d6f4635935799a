//! Conversation feed service.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::feed::domain::FeedEntry;
use crate::feed::ports::repository::FeedStore;
use crate::identity::domain::{ConversationId, UserId};
use crate::pagination::PageRequest;
use crate::store::StoreResult;

/// Maintains and reads the per-user conversation feed.
///
/// Refreshes are issued once per participant by the send path; each one is
/// an independent store write with no shared transaction, so the caller is
/// responsible for collecting and surfacing partial failures.
#[derive(Clone)]
pub struct ConversationFeed<R>
where
    R: FeedStore,
{
    store: Arc<R>,
}

impl<R> ConversationFeed<R>
where
    R: FeedStore,
{
    /// Creates a new feed service.
    #[must_use]
    pub const fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Writes a fresh feed entry for one user, superseding earlier entries
    /// for the conversation in ranking order.
    ///
    /// `last_updated_at` is the send instant of the message being
    /// snapshotted, so every participant's feed ranks the conversation
    /// identically.
    ///
    /// # Errors
    ///
    /// Returns a store error when the write cannot be served.
    pub async fn refresh(
        &self,
        user: UserId,
        conversation: ConversationId,
        last_message: &str,
        last_updated_at: DateTime<Utc>,
        other_participants: impl IntoIterator<Item = UserId> + Send,
    ) -> StoreResult<()> {
        let entry = FeedEntry::new(
            user,
            conversation,
            last_updated_at,
            last_message,
            other_participants,
        );
        self.store.push(&entry).await
    }

    /// Returns one offset page of the user's feed, most recent first.
    ///
    /// Same fetch-then-slice contract as the message log: the first
    /// `page * limit` rows are fetched and the window sliced in memory, so
    /// cost grows with page depth. Shadowed rows count towards the fetched
    /// window; a user with no conversations gets an empty page.
    ///
    /// # Errors
    ///
    /// Returns a store error when the read cannot be served.
    pub async fn list_for_user(
        &self,
        user: UserId,
        request: PageRequest,
    ) -> StoreResult<Vec<FeedEntry>> {
        let rows = self.store.newest(user, request.fetch_window()).await?;
        Ok(request.slice(rows))
    }
}
