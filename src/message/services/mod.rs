//! Message log service: append and paginate.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use thiserror::Error;

use crate::identity::domain::{ConversationId, UserId};
use crate::message::domain::{EmptyMessageContent, Message};
use crate::message::ports::repository::MessageStore;
use crate::pagination::PageRequest;
use crate::store::StoreUnavailableError;

/// Service-level errors for the message log.
#[derive(Debug, Error)]
pub enum MessageLogError {
    /// The message content failed validation.
    #[error(transparent)]
    Content(#[from] EmptyMessageContent),

    /// The store could not serve the call.
    #[error(transparent)]
    Store(#[from] StoreUnavailableError),
}

/// Result type for message log operations.
pub type MessageLogResult<T> = Result<T, MessageLogError>;

/// The append-only conversation log.
///
/// Appends are monotonically non-decreasing within a single writer (the
/// clock only moves forward) but carry no global ordering guarantee across
/// concurrent senders; the identifier tie-break keeps same-instant rows
/// deterministically ordered for readers.
#[derive(Clone)]
pub struct MessageLog<R, C>
where
    R: MessageStore,
    C: Clock + Send + Sync,
{
    store: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> MessageLog<R, C>
where
    R: MessageStore,
    C: Clock + Send + Sync,
{
    /// Creates a new log service.
    #[must_use]
    pub const fn new(store: Arc<R>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Appends a message stamped with the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`MessageLogError::Content`] for empty content, or
    /// [`MessageLogError::Store`] when the write cannot be served.
    pub async fn append(
        &self,
        conversation: ConversationId,
        sender: UserId,
        receiver: UserId,
        content: &str,
    ) -> MessageLogResult<Message> {
        let message = Message::new(conversation, sender, receiver, content, &*self.clock)?;
        self.store.append(&message).await?;
        Ok(message)
    }

    /// Returns one offset page of the conversation, newest first.
    ///
    /// The store has no native offset, so this fetches the first
    /// `page * limit` rows and slices the requested window in memory — the
    /// call is O(page·limit) and does not scale to deep pages. Use
    /// [`MessageLog::page_before`] for deep history.
    ///
    /// An empty range yields an empty page, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`MessageLogError::Store`] when the read cannot be served.
    pub async fn page_by_offset(
        &self,
        conversation: ConversationId,
        request: PageRequest,
    ) -> MessageLogResult<Vec<Message>> {
        let rows = self
            .store
            .newest(conversation, request.fetch_window())
            .await?;
        Ok(request.slice(rows))
    }

    /// Returns one offset page of the messages strictly older than `before`.
    ///
    /// The cursor for the next page is the send instant of the oldest
    /// message in the current one. The same fetch-then-slice contract as
    /// [`MessageLog::page_by_offset`] applies within the narrowed range, so
    /// callers normally keep `page == 1` and move the cursor instead.
    ///
    /// # Errors
    ///
    /// Returns [`MessageLogError::Store`] when the read cannot be served.
    pub async fn page_before(
        &self,
        conversation: ConversationId,
        before: DateTime<Utc>,
        request: PageRequest,
    ) -> MessageLogResult<Vec<Message>> {
        let rows = self
            .store
            .newest_before(conversation, before, request.fetch_window())
            .await?;
        Ok(request.slice(rows))
    }

    /// Returns the newest message of a conversation, if any.
    ///
    /// # Errors
    ///
    /// Returns [`MessageLogError::Store`] when the read cannot be served.
    pub async fn newest_entry(
        &self,
        conversation: ConversationId,
    ) -> MessageLogResult<Option<Message>> {
        let mut rows = self.store.newest(conversation, 1).await?;
        Ok(rows.pop())
    }
}
