//! Identifier newtypes for users and conversations.
//!
//! Each entity has two handles: a stable UUID used as the internal key of
//! every relation, and a dense integer index exposed to external callers.
//! Wrapping both in dedicated types prevents the two address spaces from
//! being mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Internal identifier for a user.
///
/// # Examples
///
/// ```
/// use ronchamp::identity::domain::UserId;
///
/// let id = UserId::new();
/// assert!(!id.as_ref().is_nil());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for UserId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Internal identifier for a conversation.
///
/// Conversation identifiers are derived deterministically from the
/// participant set (see the conversation module) rather than generated at
/// random, so concurrent first-contact sends converge on the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(Uuid);

impl ConversationId {
    /// Creates a conversation identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for ConversationId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense, externally stable index for a user.
///
/// Assigned at provisioning time and never revised; the external request
/// layer addresses users exclusively through this value.
///
/// # Examples
///
/// ```
/// use ronchamp::identity::domain::UserIndex;
///
/// let index = UserIndex::new(0);
/// assert_eq!(index.value(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserIndex(i32);

impl UserIndex {
    /// Creates a user index from its integer value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for UserIndex {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense, externally stable index for a conversation.
///
/// Allocated by the store when a conversation is first registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationIndex(i32);

impl ConversationIndex {
    /// Creates a conversation index from its integer value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for ConversationIndex {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ConversationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
