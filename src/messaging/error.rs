//! The caller-facing error taxonomy.
//!
//! Four kinds cross the boundary: not-found (do not retry), store
//! unavailability (retry with backoff), partial write (the message is
//! durable but a feed view was not refreshed), and validation. The core
//! never downgrades a write failure to a successful-looking response.

use thiserror::Error;

use crate::conversation::domain::ParticipantSetError;
use crate::conversation::services::ParticipantRegistryError;
use crate::identity::domain::{ConversationId, ConversationIndex, UserId, UserIndex};
use crate::identity::ports::repository::IdentityRepositoryError;
use crate::identity::services::IdentityError;
use crate::message::domain::{EmptyMessageContent, MessageId};
use crate::message::services::MessageLogError;
use crate::pagination::InvalidPageRequest;
use crate::store::StoreUnavailableError;

/// An index or identifier did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    /// No user is registered under the index.
    #[error("no user found for index {0}")]
    UserIndex(UserIndex),

    /// No user is registered under the identifier.
    #[error("no user found for identifier {0}")]
    UserId(UserId),

    /// No conversation is registered under the index.
    #[error("no conversation found for index {0}")]
    ConversationIndex(ConversationIndex),

    /// No conversation is registered under the identifier.
    #[error("no conversation found for identifier {0}")]
    ConversationId(ConversationId),

    /// The conversation has no recorded participants.
    #[error("no participants recorded for conversation {0}")]
    Participants(ConversationId),
}

/// Malformed input or stored state that fails an invariant.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// The message content is empty.
    #[error(transparent)]
    Content(#[from] EmptyMessageContent),

    /// The participant set fails the minimum-membership invariant.
    #[error(transparent)]
    Membership(#[from] ParticipantSetError),

    /// The page parameters are out of range.
    #[error(transparent)]
    Page(#[from] InvalidPageRequest),

    /// A write-once identity registration clashed with an existing mapping.
    #[error("identity registration conflict: {0}")]
    IdentityConflict(String),
}

/// A send fan-out partially failed after the message was durably appended.
///
/// The message is in the log; the named participants' feeds were not
/// refreshed. Surfaced so a reconciliation pass can repair the feed — never
/// swallowed.
#[derive(Debug, Clone, Error)]
#[error(
    "message {message_id} in conversation {conversation_id} is recorded, \
     but the feed refresh failed for {} participant(s)",
    .failed.len()
)]
pub struct PartialWriteError {
    /// The durably appended message.
    pub message_id: MessageId,

    /// The conversation that was written to.
    pub conversation_id: ConversationId,

    /// The participants whose feed refresh failed, with the cause of each.
    pub failed: Vec<(UserId, StoreUnavailableError)>,
}

/// Any failure crossing the operation surface.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// An index or identifier did not resolve.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The store could not serve a call; retry with backoff.
    #[error(transparent)]
    StoreUnavailable(#[from] StoreUnavailableError),

    /// The message is durable but the feed fan-out partially failed.
    #[error(transparent)]
    PartialWrite(#[from] PartialWriteError),

    /// The input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for operation-surface calls.
pub type MessagingResult<T> = Result<T, MessagingError>;

impl From<IdentityError> for MessagingError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::UnknownUserIndex(index) => Self::NotFound(NotFoundError::UserIndex(index)),
            IdentityError::UnknownUserId(id) => Self::NotFound(NotFoundError::UserId(id)),
            IdentityError::UnknownConversationIndex(index) => {
                Self::NotFound(NotFoundError::ConversationIndex(index))
            }
            IdentityError::UnknownConversationId(id) => {
                Self::NotFound(NotFoundError::ConversationId(id))
            }
            IdentityError::Repository(IdentityRepositoryError::Store(store)) => {
                Self::StoreUnavailable(store)
            }
            IdentityError::Repository(conflict) => {
                Self::Validation(ValidationError::IdentityConflict(conflict.to_string()))
            }
        }
    }
}

impl From<ParticipantRegistryError> for MessagingError {
    fn from(err: ParticipantRegistryError) -> Self {
        match err {
            ParticipantRegistryError::UnknownConversation(id) => {
                Self::NotFound(NotFoundError::Participants(id))
            }
            ParticipantRegistryError::CorruptMembership { source, .. } => {
                Self::Validation(ValidationError::Membership(source))
            }
            ParticipantRegistryError::Store(store) => Self::StoreUnavailable(store),
        }
    }
}

impl From<MessageLogError> for MessagingError {
    fn from(err: MessageLogError) -> Self {
        match err {
            MessageLogError::Content(content) => Self::Validation(ValidationError::Content(content)),
            MessageLogError::Store(store) => Self::StoreUnavailable(store),
        }
    }
}

impl From<ParticipantSetError> for MessagingError {
    fn from(err: ParticipantSetError) -> Self {
        Self::Validation(ValidationError::Membership(err))
    }
}

impl From<InvalidPageRequest> for MessagingError {
    fn from(err: InvalidPageRequest) -> Self {
        Self::Validation(ValidationError::Page(err))
    }
}
