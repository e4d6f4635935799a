//! One denormalised feed row.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::domain::{ConversationId, UserId};

/// A user's view of one conversation at one point in time.
///
/// Entries are superseded, never merged: each send produces a fresh entry
/// per participant, and the newest entry for a conversation shadows all
/// earlier ones in ranking order `(last_updated_at DESC, conversation ASC)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    user: UserId,
    conversation: ConversationId,
    last_updated_at: DateTime<Utc>,
    last_message: String,
    other_participants: BTreeSet<UserId>,
}

impl FeedEntry {
    /// Creates a feed entry.
    #[must_use]
    pub fn new(
        user: UserId,
        conversation: ConversationId,
        last_updated_at: DateTime<Utc>,
        last_message: impl Into<String>,
        other_participants: impl IntoIterator<Item = UserId>,
    ) -> Self {
        Self {
            user,
            conversation,
            last_updated_at,
            last_message: last_message.into(),
            other_participants: other_participants.into_iter().collect(),
        }
    }

    /// The user whose feed this entry belongs to (partition key).
    #[must_use]
    pub const fn user(&self) -> UserId {
        self.user
    }

    /// The conversation this entry summarises.
    #[must_use]
    pub const fn conversation(&self) -> ConversationId {
        self.conversation
    }

    /// The instant of the message this entry snapshots.
    #[must_use]
    pub const fn last_updated_at(&self) -> DateTime<Utc> {
        self.last_updated_at
    }

    /// Content snapshot of the newest message at refresh time.
    #[must_use]
    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    /// The conversation's participants other than the feed owner.
    #[must_use]
    pub const fn other_participants(&self) -> &BTreeSet<UserId> {
        &self.other_participants
    }

    /// The ranking comparator: most recently updated first, ties broken by
    /// conversation identifier ascending.
    #[must_use]
    pub fn newest_first(a: &Self, b: &Self) -> Ordering {
        b.last_updated_at
            .cmp(&a.last_updated_at)
            .then_with(|| a.conversation.cmp(&b.conversation))
    }
}
