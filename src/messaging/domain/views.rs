//! Response shapes for the operation surface.
//!
//! These types carry external indices only; the single internal identifier
//! that leaks is the message id, which has no index mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::identity::domain::{ConversationIndex, UserIndex};
use crate::message::domain::MessageId;

/// One message as seen by an external caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    /// The message identifier.
    pub id: MessageId,
    /// The conversation's external index.
    pub conversation: ConversationIndex,
    /// The sender's external index.
    pub sender: UserIndex,
    /// The receiver's external index.
    pub receiver: UserIndex,
    /// The message body.
    pub content: String,
    /// The send instant.
    pub sent_at: DateTime<Utc>,
}

/// One conversation feed entry as seen by an external caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedView {
    /// The conversation's external index.
    pub conversation: ConversationIndex,
    /// External indices of the participants other than the feed owner.
    pub other_participants: Vec<UserIndex>,
    /// Instant of the newest message at snapshot time.
    pub last_message_at: DateTime<Utc>,
    /// Content of the newest message at snapshot time.
    pub last_message_content: String,
}

/// A conversation's membership and latest-message snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSummary {
    /// The conversation's external index.
    pub conversation: ConversationIndex,
    /// External indices of every participant, ascending.
    pub participants: Vec<UserIndex>,
    /// Instant of the newest message, if any message exists.
    pub last_message_at: Option<DateTime<Utc>>,
    /// Content of the newest message, if any message exists.
    pub last_message_content: Option<String>,
}

/// Receipt for a successfully delivered send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentMessage {
    /// The appended message's identifier.
    pub message_id: MessageId,
    /// External index of the conversation the message landed in.
    pub conversation: ConversationIndex,
    /// The sender's external index.
    pub sender: UserIndex,
    /// The receiver's external index.
    pub receiver: UserIndex,
    /// The message body as recorded.
    pub content: String,
    /// The send instant as recorded.
    pub sent_at: DateTime<Utc>,
}
