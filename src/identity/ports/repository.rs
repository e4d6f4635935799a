//! Repository port for identity mappings.

use crate::identity::domain::{ConversationId, ConversationIndex, UserId, UserIndex, UserRecord};
use crate::store::StoreUnavailableError;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for identity repository operations.
pub type IdentityRepositoryResult<T> = Result<T, IdentityRepositoryError>;

/// Errors returned by identity repository implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityRepositoryError {
    /// A user record with this identifier is already registered.
    #[error("user already registered: {0}")]
    DuplicateUser(UserId),

    /// A user record with this index is already registered.
    #[error("user index already registered: {0}")]
    DuplicateUserIndex(UserIndex),

    /// The store could not serve the call.
    #[error(transparent)]
    Store(#[from] StoreUnavailableError),
}

/// Persistence contract for the identity index.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - `(id ↔ index)` mappings are bijective and write-once
/// - `register_conversation` is idempotent: repeated calls for the same
///   identifier return the same index
/// - Index lookups resolve in O(1) expected cost (dedicated index structure
///   or secondary index, never a partition scan)
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Registers a provisioned user record.
    ///
    /// This is the typed entry point for the external bootstrap; it is never
    /// called on the hot path.
    ///
    /// # Errors
    ///
    /// Returns a duplicate variant when the identifier or index is already
    /// taken, or [`IdentityRepositoryError::Store`] when the store fails.
    async fn register_user(&self, record: &UserRecord) -> IdentityRepositoryResult<()>;

    /// Looks up a user record by external index.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::Store`] when the store fails.
    async fn find_user_by_index(
        &self,
        index: UserIndex,
    ) -> IdentityRepositoryResult<Option<UserRecord>>;

    /// Looks up a user record by internal identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::Store`] when the store fails.
    async fn find_user_by_id(&self, id: UserId) -> IdentityRepositoryResult<Option<UserRecord>>;

    /// Registers a conversation identifier, allocating its dense index.
    ///
    /// Idempotent: when the identifier is already registered the existing
    /// index is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::Store`] when the store fails.
    async fn register_conversation(
        &self,
        id: ConversationId,
    ) -> IdentityRepositoryResult<ConversationIndex>;

    /// Looks up a conversation identifier by external index.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::Store`] when the store fails.
    async fn find_conversation_by_index(
        &self,
        index: ConversationIndex,
    ) -> IdentityRepositoryResult<Option<ConversationId>>;

    /// Looks up a conversation index by internal identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::Store`] when the store fails.
    async fn find_conversation_by_id(
        &self,
        id: ConversationId,
    ) -> IdentityRepositoryResult<Option<ConversationIndex>>;
}
