//! The validated participant set and deterministic conversation identity.

use std::collections::BTreeSet;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::identity::domain::{ConversationId, UserId};

/// Errors raised while constructing a participant set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParticipantSetError {
    /// The set contained no participants at all.
    #[error("participant set is empty")]
    Empty,

    /// Fewer than two distinct participants remained after deduplication.
    #[error("conversation requires at least 2 distinct participants, got {actual}")]
    TooFew {
        /// Number of distinct participants supplied.
        actual: usize,
    },
}

/// The unordered, deduplicated membership of a conversation.
///
/// Always holds at least two distinct users; enforced at construction so a
/// value of this type is membership a conversation can legally have.
///
/// # Examples
///
/// ```
/// use ronchamp::conversation::domain::ParticipantSet;
/// use ronchamp::identity::domain::UserId;
///
/// let a = UserId::new();
/// let b = UserId::new();
/// let participants = ParticipantSet::new([a, b]).expect("two distinct users");
/// assert_eq!(participants.len(), 2);
/// assert_eq!(participants.conversation_id(), ParticipantSet::new([b, a]).expect("same pair").conversation_id());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantSet(BTreeSet<UserId>);

impl ParticipantSet {
    /// Builds a participant set from the given users.
    ///
    /// Duplicates are collapsed before the size check, so a sender addressing
    /// themselves fails with [`ParticipantSetError::TooFew`].
    ///
    /// # Errors
    ///
    /// Returns [`ParticipantSetError`] when fewer than two distinct users
    /// are supplied.
    pub fn new(users: impl IntoIterator<Item = UserId>) -> Result<Self, ParticipantSetError> {
        let set: BTreeSet<UserId> = users.into_iter().collect();
        match set.len() {
            0 => Err(ParticipantSetError::Empty),
            1 => Err(ParticipantSetError::TooFew { actual: 1 }),
            _ => Ok(Self(set)),
        }
    }

    /// Number of distinct participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: an empty set cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the given user belongs to the conversation.
    #[must_use]
    pub fn contains(&self, user: UserId) -> bool {
        self.0.contains(&user)
    }

    /// Iterates the participants in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = UserId> + '_ {
        self.0.iter().copied()
    }

    /// The participants other than the given user, in sorted order.
    ///
    /// This is the `other_participants` projection carried by each feed
    /// entry.
    #[must_use]
    pub fn others_than(&self, user: UserId) -> Vec<UserId> {
        self.0.iter().copied().filter(|p| *p != user).collect()
    }

    /// Derives the conversation identifier for this membership.
    ///
    /// The identifier is the SHA-256 digest of the sorted participant UUIDs,
    /// truncated to 128 bits and stamped as a custom (v8) UUID. Equal sets
    /// always derive equal identifiers, which turns concurrent first-contact
    /// creation races into idempotent lookups.
    #[must_use]
    pub fn conversation_id(&self) -> ConversationId {
        let mut hasher = Sha256::new();
        for participant in &self.0 {
            hasher.update(participant.as_ref().as_bytes());
        }
        let digest = hasher.finalize();

        let mut bytes = [0_u8; 16];
        for (dst, src) in bytes.iter_mut().zip(digest.iter()) {
            *dst = *src;
        }
        ConversationId::from_uuid(uuid::Builder::from_custom_bytes(bytes).into_uuid())
    }
}

impl<'a> IntoIterator for &'a ParticipantSet {
    type Item = &'a UserId;
    type IntoIter = std::collections::btree_set::Iter<'a, UserId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
