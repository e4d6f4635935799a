//! In-memory implementation of the `ParticipantRepository` port.
//!
//! Emulates one partition per conversation clustered by user identifier:
//! a [`BTreeMap`] keyed by user keeps membership in clustering order, and
//! insert-if-absent preserves the write-once `joined_at` fact.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::conversation::domain::ParticipantSet;
use crate::conversation::ports::repository::ParticipantRepository;
use crate::identity::domain::{ConversationId, UserId};
use crate::store::{StoreResult, StoreUnavailableError};

type Memberships = HashMap<ConversationId, BTreeMap<UserId, DateTime<Utc>>>;

/// In-memory implementation of [`ParticipantRepository`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryParticipantRepository {
    memberships: Arc<RwLock<Memberships>>,
}

impl InMemoryParticipantRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded `joined_at` for a membership row, if present.
    #[must_use]
    pub fn joined_at(&self, conversation: ConversationId, user: UserId) -> Option<DateTime<Utc>> {
        self.memberships
            .read()
            .ok()
            .and_then(|guard| guard.get(&conversation).and_then(|m| m.get(&user)).copied())
    }
}

fn poisoned(e: impl std::fmt::Display) -> StoreUnavailableError {
    StoreUnavailableError::connection(format!("lock poisoned: {e}"))
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn add_participants(
        &self,
        conversation: ConversationId,
        participants: &ParticipantSet,
        joined_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut guard = self.memberships.write().map_err(poisoned)?;
        let membership = guard.entry(conversation).or_default();
        for user in participants.iter() {
            membership.entry(user).or_insert(joined_at);
        }
        Ok(())
    }

    async fn participants_of(&self, conversation: ConversationId) -> StoreResult<Vec<UserId>> {
        let guard = self.memberships.read().map_err(poisoned)?;
        Ok(guard
            .get(&conversation)
            .map(|membership| membership.keys().copied().collect())
            .unwrap_or_default())
    }
}
