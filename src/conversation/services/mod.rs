//! Participant registry service.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;

use crate::conversation::domain::{ParticipantSet, ParticipantSetError};
use crate::conversation::ports::repository::ParticipantRepository;
use crate::identity::domain::{ConversationId, UserId};
use crate::store::StoreUnavailableError;

/// Service-level errors for the participant registry.
#[derive(Debug, Error)]
pub enum ParticipantRegistryError {
    /// The conversation has no recorded participants.
    #[error("no participants recorded for conversation {0}")]
    UnknownConversation(ConversationId),

    /// Stored membership violates the participant-set invariant.
    #[error("conversation {conversation} has corrupt membership: {source}")]
    CorruptMembership {
        /// The conversation whose membership failed validation.
        conversation: ConversationId,
        /// The invariant violation.
        #[source]
        source: ParticipantSetError,
    },

    /// The store could not serve the call.
    #[error(transparent)]
    Store(#[from] StoreUnavailableError),
}

/// Result type for participant registry operations.
pub type ParticipantRegistryResult<T> = Result<T, ParticipantRegistryError>;

/// Records and answers conversation membership.
///
/// Creation is not made idempotent by the store (it has no cross-partition
/// uniqueness constraint); instead the conversation identifier is derived
/// from the participant set, so repeated and concurrent creation collapses
/// into idempotent membership inserts against one partition.
#[derive(Clone)]
pub struct ParticipantRegistry<R, C>
where
    R: ParticipantRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ParticipantRegistry<R, C>
where
    R: ParticipantRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates the conversation for this membership, or converges on the
    /// existing one.
    ///
    /// Membership rows are inserted idempotently with the current instant as
    /// `joined_at`; rows that already exist keep their original fact.
    ///
    /// # Errors
    ///
    /// Returns [`ParticipantRegistryError::Store`] when the write cannot be
    /// served.
    pub async fn create_or_get(
        &self,
        participants: &ParticipantSet,
    ) -> ParticipantRegistryResult<ConversationId> {
        let conversation = participants.conversation_id();
        self.repository
            .add_participants(conversation, participants, self.clock.utc())
            .await?;
        Ok(conversation)
    }

    /// Returns the validated membership of a conversation.
    ///
    /// # Errors
    ///
    /// Returns [`ParticipantRegistryError::UnknownConversation`] when no
    /// membership rows exist, or
    /// [`ParticipantRegistryError::CorruptMembership`] when the stored rows
    /// violate the minimum-size invariant.
    pub async fn participants(
        &self,
        conversation: ConversationId,
    ) -> ParticipantRegistryResult<ParticipantSet> {
        let users: Vec<UserId> = self.repository.participants_of(conversation).await?;
        if users.is_empty() {
            return Err(ParticipantRegistryError::UnknownConversation(conversation));
        }
        ParticipantSet::new(users).map_err(|source| ParticipantRegistryError::CorruptMembership {
            conversation,
            source,
        })
    }
}
