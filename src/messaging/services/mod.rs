//! Orchestration of the four components behind the operation surface.

use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::conversation::domain::ParticipantSet;
use crate::conversation::ports::repository::ParticipantRepository;
use crate::conversation::services::ParticipantRegistry;
use crate::feed::domain::FeedEntry;
use crate::feed::ports::repository::FeedStore;
use crate::feed::services::ConversationFeed;
use crate::identity::domain::{ConversationIndex, UserIndex, UserRecord};
use crate::identity::ports::repository::IdentityRepository;
use crate::identity::services::IdentityIndex;
use crate::message::domain::{EmptyMessageContent, Message};
use crate::message::ports::repository::MessageStore;
use crate::message::services::MessageLog;
use crate::messaging::domain::{ConversationSummary, FeedView, MessageView, SentMessage};
use crate::messaging::error::{MessagingError, MessagingResult, PartialWriteError, ValidationError};
use crate::pagination::{PageRequest, Paginated};

/// The operation surface composing identity, membership, log, and feed.
///
/// Each operation is a short-lived, independently schedulable unit of work;
/// no lock is held across store calls and no state is shared between
/// operations beyond the store itself. Concurrent callers, including
/// concurrent senders into the same conversation, need no coordination.
#[derive(Clone)]
pub struct MessagingService<IR, PR, MR, FR, C>
where
    IR: IdentityRepository,
    PR: ParticipantRepository,
    MR: MessageStore,
    FR: FeedStore,
    C: Clock + Send + Sync,
{
    identity: IdentityIndex<IR>,
    registry: ParticipantRegistry<PR, C>,
    log: MessageLog<MR, C>,
    feed: ConversationFeed<FR>,
}

impl<IR, PR, MR, FR, C> MessagingService<IR, PR, MR, FR, C>
where
    IR: IdentityRepository,
    PR: ParticipantRepository,
    MR: MessageStore,
    FR: FeedStore,
    C: Clock + Send + Sync,
{
    /// Composes the service from its four components.
    #[must_use]
    pub const fn new(
        identity: IdentityIndex<IR>,
        registry: ParticipantRegistry<PR, C>,
        log: MessageLog<MR, C>,
        feed: ConversationFeed<FR>,
    ) -> Self {
        Self {
            identity,
            registry,
            log,
            feed,
        }
    }

    /// The identity index this service resolves through.
    ///
    /// Exposed so the external bootstrap can provision users against the
    /// same repository the operations read from.
    #[must_use]
    pub const fn identity(&self) -> &IdentityIndex<IR> {
        &self.identity
    }

    /// Sends a message from one user to another.
    ///
    /// Resolves both indices, converges on the conversation for the pair
    /// (creating it on first contact), appends exactly one log row, then
    /// refreshes the feed entry of every participant, the sender included.
    /// The fan-out writes are independent: when any of them fails after the
    /// append succeeded, the send fails with
    /// [`MessagingError::PartialWrite`] naming the affected participants —
    /// the message itself is durable.
    ///
    /// # Errors
    ///
    /// - [`MessagingError::NotFound`] when an index does not resolve
    /// - [`MessagingError::Validation`] for empty content or a sender
    ///   addressing themselves
    /// - [`MessagingError::StoreUnavailable`] when a store call fails before
    ///   the append
    /// - [`MessagingError::PartialWrite`] when the append succeeded but a
    ///   feed refresh did not
    pub async fn send_message(
        &self,
        sender: UserIndex,
        receiver: UserIndex,
        content: &str,
    ) -> MessagingResult<SentMessage> {
        // Reject empty content before any store write, so a failed
        // validation cannot leave a conversation behind.
        if content.is_empty() {
            return Err(MessagingError::Validation(ValidationError::Content(
                EmptyMessageContent,
            )));
        }

        let sender_record = self.identity.resolve_user_index(sender).await?;
        let receiver_record = self.identity.resolve_user_index(receiver).await?;

        let participants = ParticipantSet::new([sender_record.id(), receiver_record.id()])?;
        let conversation = self.registry.create_or_get(&participants).await?;
        let conversation_index = self.identity.register_conversation(conversation).await?;

        let message = self
            .log
            .append(conversation, sender_record.id(), receiver_record.id(), content)
            .await?;

        let mut failed = Vec::new();
        for participant in participants.iter() {
            let refresh = self
                .feed
                .refresh(
                    participant,
                    conversation,
                    message.content(),
                    message.sent_at(),
                    participants.others_than(participant),
                )
                .await;
            if let Err(err) = refresh {
                log::error!(
                    "feed refresh failed for user {participant} in conversation {conversation}: {err}"
                );
                failed.push((participant, err));
            }
        }

        if !failed.is_empty() {
            return Err(MessagingError::PartialWrite(PartialWriteError {
                message_id: message.id(),
                conversation_id: conversation,
                failed,
            }));
        }

        Ok(SentMessage {
            message_id: message.id(),
            conversation: conversation_index,
            sender,
            receiver,
            content: message.content().to_owned(),
            sent_at: message.sent_at(),
        })
    }

    /// Lists a user's conversations, most recently active first.
    ///
    /// Rows whose conversation or participants no longer resolve are logged
    /// and skipped rather than failing the page; the skip count is reported
    /// in the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::NotFound`] for an unknown user index,
    /// [`MessagingError::Validation`] for out-of-range page parameters, or
    /// [`MessagingError::StoreUnavailable`] when the store fails.
    pub async fn list_user_conversations(
        &self,
        user: UserIndex,
        page: u32,
        limit: u32,
    ) -> MessagingResult<Paginated<FeedView>> {
        let request = PageRequest::new(page, limit)?;
        let record = self.identity.resolve_user_index(user).await?;
        let entries = self.feed.list_for_user(record.id(), request).await?;

        let mut views = Vec::with_capacity(entries.len());
        let mut skipped = 0;
        for entry in entries {
            match self.feed_view(&entry).await {
                Ok(view) => views.push(view),
                Err(MessagingError::NotFound(reason)) => {
                    log::warn!(
                        "skipping feed row for user {user} in conversation {}: {reason}",
                        entry.conversation()
                    );
                    skipped += 1;
                }
                Err(other) => return Err(other),
            }
        }

        Ok(Paginated::new(views, request, skipped))
    }

    /// Returns a conversation's membership and newest-message snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::NotFound`] when the index, the membership,
    /// or a participant does not resolve, or
    /// [`MessagingError::StoreUnavailable`] when the store fails.
    pub async fn get_conversation(
        &self,
        conversation: ConversationIndex,
    ) -> MessagingResult<ConversationSummary> {
        let conversation_id = self.identity.resolve_conversation_index(conversation).await?;
        let participants = self.registry.participants(conversation_id).await?;

        let mut indices = Vec::with_capacity(participants.len());
        for participant in participants.iter() {
            let record: UserRecord = self.identity.resolve_user_id(participant).await?;
            indices.push(record.index());
        }
        indices.sort_unstable();

        let newest = self.log.newest_entry(conversation_id).await?;
        Ok(ConversationSummary {
            conversation,
            participants: indices,
            last_message_at: newest.as_ref().map(Message::sent_at),
            last_message_content: newest.map(|m| m.content().to_owned()),
        })
    }

    /// Returns one offset page of a conversation's messages, newest first.
    ///
    /// Inherits the fetch-then-slice offset contract of the message log:
    /// cost grows with page depth, so deep readers should switch to
    /// [`MessagingService::get_messages_before_timestamp`]. Rows whose
    /// sender or receiver no longer resolves are logged, skipped, and
    /// counted.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::NotFound`] for an unknown conversation
    /// index, [`MessagingError::Validation`] for out-of-range page
    /// parameters, or [`MessagingError::StoreUnavailable`] when the store
    /// fails.
    pub async fn get_conversation_messages(
        &self,
        conversation: ConversationIndex,
        page: u32,
        limit: u32,
    ) -> MessagingResult<Paginated<MessageView>> {
        let request = PageRequest::new(page, limit)?;
        let conversation_id = self.identity.resolve_conversation_index(conversation).await?;
        let messages = self.log.page_by_offset(conversation_id, request).await?;
        self.to_message_page(conversation, messages, request).await
    }

    /// Returns one page of the messages strictly older than `before`.
    ///
    /// This is the cursor path: pass the send instant of the oldest message
    /// from the previous page to walk history without paying for offset
    /// depth.
    ///
    /// # Errors
    ///
    /// Same as [`MessagingService::get_conversation_messages`].
    pub async fn get_messages_before_timestamp(
        &self,
        conversation: ConversationIndex,
        before: DateTime<Utc>,
        page: u32,
        limit: u32,
    ) -> MessagingResult<Paginated<MessageView>> {
        let request = PageRequest::new(page, limit)?;
        let conversation_id = self.identity.resolve_conversation_index(conversation).await?;
        let messages = self.log.page_before(conversation_id, before, request).await?;
        self.to_message_page(conversation, messages, request).await
    }

    async fn feed_view(&self, entry: &FeedEntry) -> MessagingResult<FeedView> {
        let conversation = self
            .identity
            .resolve_conversation_id(entry.conversation())
            .await?;

        let mut others = Vec::with_capacity(entry.other_participants().len());
        for participant in entry.other_participants() {
            let record = self.identity.resolve_user_id(*participant).await?;
            others.push(record.index());
        }
        others.sort_unstable();

        Ok(FeedView {
            conversation,
            other_participants: others,
            last_message_at: entry.last_updated_at(),
            last_message_content: entry.last_message().to_owned(),
        })
    }

    async fn to_message_page(
        &self,
        conversation: ConversationIndex,
        messages: Vec<Message>,
        request: PageRequest,
    ) -> MessagingResult<Paginated<MessageView>> {
        let mut views = Vec::with_capacity(messages.len());
        let mut skipped = 0;
        for message in messages {
            match self.message_view(conversation, &message).await {
                Ok(view) => views.push(view),
                Err(MessagingError::NotFound(reason)) => {
                    log::warn!(
                        "skipping message {} in conversation {conversation}: {reason}",
                        message.id()
                    );
                    skipped += 1;
                }
                Err(other) => return Err(other),
            }
        }
        Ok(Paginated::new(views, request, skipped))
    }

    async fn message_view(
        &self,
        conversation: ConversationIndex,
        message: &Message,
    ) -> MessagingResult<MessageView> {
        let sender = self.identity.resolve_user_id(message.sender()).await?;
        let receiver = self.identity.resolve_user_id(message.receiver()).await?;
        Ok(MessageView {
            id: message.id(),
            conversation,
            sender: sender.index(),
            receiver: receiver.index(),
            content: message.content().to_owned(),
            sent_at: message.sent_at(),
        })
    }
}
