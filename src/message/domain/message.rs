//! The Message aggregate: one immutable row of the conversation log.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::MessageId;
use crate::identity::domain::{ConversationId, UserId};

/// Error raised when a message is created with no content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("message content cannot be empty")]
pub struct EmptyMessageContent;

/// A message within a conversation.
///
/// Messages are immutable after creation: the log never updates or deletes
/// them, and every denormalised view carries copies rather than references.
///
/// # Invariants
///
/// - `content` is non-empty (enforced at construction)
/// - `sent_at` is the send-time instant taken from the clock at creation
/// - ordering within a conversation is `(sent_at DESC, id ASC)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    conversation_id: ConversationId,
    sender: UserId,
    receiver: UserId,
    content: String,
    sent_at: DateTime<Utc>,
}

impl Message {
    /// Creates a new message stamped with the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyMessageContent`] when the content is empty.
    pub fn new(
        conversation_id: ConversationId,
        sender: UserId,
        receiver: UserId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, EmptyMessageContent> {
        let content = content.into();
        if content.is_empty() {
            return Err(EmptyMessageContent);
        }

        Ok(Self {
            id: MessageId::new(),
            conversation_id,
            sender,
            receiver,
            content,
            sent_at: clock.utc(),
        })
    }

    /// Reconstructs a message from stored parts.
    ///
    /// Used by adapters reading rows back; stored content is trusted as
    /// written.
    #[must_use]
    pub fn from_parts(
        id: MessageId,
        conversation_id: ConversationId,
        sender: UserId,
        receiver: UserId,
        content: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender,
            receiver,
            content: content.into(),
            sent_at,
        }
    }

    /// The message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// The conversation this message belongs to.
    #[must_use]
    pub const fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    /// The sending user.
    #[must_use]
    pub const fn sender(&self) -> UserId {
        self.sender
    }

    /// The receiving user.
    #[must_use]
    pub const fn receiver(&self) -> UserId {
        self.receiver
    }

    /// The message body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The send-time instant.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// The clustering comparator: newest first, ties broken by identifier
    /// ascending.
    ///
    /// This is the reader-visible ordering contract for every conversation
    /// partition; adapters that sort in memory must use it.
    #[must_use]
    pub fn newest_first(a: &Self, b: &Self) -> Ordering {
        b.sent_at
            .cmp(&a.sent_at)
            .then_with(|| a.id.cmp(&b.id))
    }
}
