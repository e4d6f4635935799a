//! Identity resolution service.

use std::sync::Arc;

use thiserror::Error;

use crate::identity::domain::{ConversationId, ConversationIndex, UserId, UserIndex, UserRecord};
use crate::identity::ports::repository::{IdentityRepository, IdentityRepositoryError};

/// Service-level errors for identity resolution.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No user is registered under the given index.
    #[error("no user found for index {0}")]
    UnknownUserIndex(UserIndex),

    /// No user is registered under the given identifier.
    #[error("no user found for identifier {0}")]
    UnknownUserId(UserId),

    /// No conversation is registered under the given index.
    #[error("no conversation found for index {0}")]
    UnknownConversationIndex(ConversationIndex),

    /// No conversation is registered under the given identifier.
    #[error("no conversation found for identifier {0}")]
    UnknownConversationId(ConversationId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] IdentityRepositoryError),
}

/// Result type for identity service operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Bidirectional index ↔ identifier resolution for users and conversations.
///
/// Everything else in the crate resolves external handles through this
/// service; the round trip `resolve(index) → resolve(identifier)` always
/// yields the original value because the underlying mappings are write-once
/// bijections.
#[derive(Debug, Clone)]
pub struct IdentityIndex<R>
where
    R: IdentityRepository,
{
    repository: Arc<R>,
}

impl<R> IdentityIndex<R>
where
    R: IdentityRepository,
{
    /// Creates a new identity index over the given repository.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a provisioned user record (bootstrap path).
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Repository`] when the record duplicates an
    /// existing mapping or the store fails.
    pub async fn register_user(&self, record: &UserRecord) -> IdentityResult<()> {
        Ok(self.repository.register_user(record).await?)
    }

    /// Resolves an external user index to its record.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::UnknownUserIndex`] when no mapping exists.
    pub async fn resolve_user_index(&self, index: UserIndex) -> IdentityResult<UserRecord> {
        self.repository
            .find_user_by_index(index)
            .await?
            .ok_or_else(|| IdentityError::UnknownUserIndex(index))
    }

    /// Resolves an internal user identifier to its record.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::UnknownUserId`] when no mapping exists.
    pub async fn resolve_user_id(&self, id: UserId) -> IdentityResult<UserRecord> {
        self.repository
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| IdentityError::UnknownUserId(id))
    }

    /// Registers a conversation identifier, returning its dense index.
    ///
    /// Idempotent across repeated and concurrent registrations.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Repository`] when the store fails.
    pub async fn register_conversation(
        &self,
        id: ConversationId,
    ) -> IdentityResult<ConversationIndex> {
        Ok(self.repository.register_conversation(id).await?)
    }

    /// Resolves an external conversation index to its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::UnknownConversationIndex`] when no mapping
    /// exists.
    pub async fn resolve_conversation_index(
        &self,
        index: ConversationIndex,
    ) -> IdentityResult<ConversationId> {
        self.repository
            .find_conversation_by_index(index)
            .await?
            .ok_or_else(|| IdentityError::UnknownConversationIndex(index))
    }

    /// Resolves an internal conversation identifier to its external index.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::UnknownConversationId`] when no mapping
    /// exists.
    pub async fn resolve_conversation_id(
        &self,
        id: ConversationId,
    ) -> IdentityResult<ConversationIndex> {
        self.repository
            .find_conversation_by_id(id)
            .await?
            .ok_or_else(|| IdentityError::UnknownConversationId(id))
    }
}
