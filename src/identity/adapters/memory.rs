//! In-memory implementation of the `IdentityRepository` port.
//!
//! Thread-safe via internal [`RwLock`]. Suitable for unit testing without
//! database dependencies; emulates the store's idempotent index allocation
//! with a monotonic counter.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::identity::domain::{ConversationId, ConversationIndex, UserId, UserIndex, UserRecord};
use crate::identity::ports::repository::{
    IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult,
};
use crate::store::StoreUnavailableError;

#[derive(Debug, Default)]
struct IdentityState {
    users_by_id: HashMap<UserId, UserRecord>,
    user_id_by_index: HashMap<UserIndex, UserId>,
    conversation_index_by_id: HashMap<ConversationId, ConversationIndex>,
    conversation_id_by_index: HashMap<ConversationIndex, ConversationId>,
    next_conversation_index: i32,
}

/// In-memory implementation of [`IdentityRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryIdentityRepository {
    state: Arc<RwLock<IdentityState>>,
}

impl InMemoryIdentityRepository {
    /// Creates an empty repository.
    ///
    /// Conversation indices are allocated densely from 1, matching the
    /// serial allocation of the database adapter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(IdentityState {
                next_conversation_index: 1,
                ..IdentityState::default()
            })),
        }
    }
}

impl Default for InMemoryIdentityRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(e: impl std::fmt::Display) -> IdentityRepositoryError {
    IdentityRepositoryError::Store(StoreUnavailableError::connection(format!(
        "lock poisoned: {e}"
    )))
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn register_user(&self, record: &UserRecord) -> IdentityRepositoryResult<()> {
        let mut guard = self.state.write().map_err(poisoned)?;

        if guard.users_by_id.contains_key(&record.id()) {
            return Err(IdentityRepositoryError::DuplicateUser(record.id()));
        }
        if guard.user_id_by_index.contains_key(&record.index()) {
            return Err(IdentityRepositoryError::DuplicateUserIndex(record.index()));
        }

        guard.user_id_by_index.insert(record.index(), record.id());
        guard.users_by_id.insert(record.id(), record.clone());
        Ok(())
    }

    async fn find_user_by_index(
        &self,
        index: UserIndex,
    ) -> IdentityRepositoryResult<Option<UserRecord>> {
        let guard = self.state.read().map_err(poisoned)?;
        Ok(guard
            .user_id_by_index
            .get(&index)
            .and_then(|id| guard.users_by_id.get(id))
            .cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> IdentityRepositoryResult<Option<UserRecord>> {
        let guard = self.state.read().map_err(poisoned)?;
        Ok(guard.users_by_id.get(&id).cloned())
    }

    async fn register_conversation(
        &self,
        id: ConversationId,
    ) -> IdentityRepositoryResult<ConversationIndex> {
        let mut guard = self.state.write().map_err(poisoned)?;

        if let Some(existing) = guard.conversation_index_by_id.get(&id) {
            return Ok(*existing);
        }

        let index = ConversationIndex::new(guard.next_conversation_index);
        guard.next_conversation_index = guard.next_conversation_index.saturating_add(1);
        guard.conversation_index_by_id.insert(id, index);
        guard.conversation_id_by_index.insert(index, id);
        Ok(index)
    }

    async fn find_conversation_by_index(
        &self,
        index: ConversationIndex,
    ) -> IdentityRepositoryResult<Option<ConversationId>> {
        let guard = self.state.read().map_err(poisoned)?;
        Ok(guard.conversation_id_by_index.get(&index).copied())
    }

    async fn find_conversation_by_id(
        &self,
        id: ConversationId,
    ) -> IdentityRepositoryResult<Option<ConversationIndex>> {
        let guard = self.state.read().map_err(poisoned)?;
        Ok(guard.conversation_index_by_id.get(&id).copied())
    }
}
