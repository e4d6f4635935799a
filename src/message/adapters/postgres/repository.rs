//! `PostgreSQL` repository implementation for the message log.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::models::{MessageRow, NewMessageRow};
use super::schema::messages_by_conversation;
use crate::identity::domain::{ConversationId, UserId};
use crate::message::domain::{Message, MessageId};
use crate::message::ports::repository::MessageStore;
use crate::store::{PgPool, StoreResult, StoreUnavailableError, get_conn, run_bounded};

/// `PostgreSQL`-backed message store.
///
/// Every read filters by the partition key, orders by the clustering keys,
/// and applies a row limit; no other predicate ever touches this table.
#[derive(Debug, Clone)]
pub struct PostgresMessageStore {
    pool: PgPool,
    call_timeout: Duration,
}

impl PostgresMessageStore {
    /// Creates a new store from a connection pool and call deadline.
    #[must_use]
    pub const fn new(pool: PgPool, call_timeout: Duration) -> Self {
        Self { pool, call_timeout }
    }
}

fn row_to_message(row: MessageRow) -> Message {
    Message::from_parts(
        MessageId::from_uuid(row.message_id),
        ConversationId::from_uuid(row.conversation_id),
        UserId::from_uuid(row.sender_id),
        UserId::from_uuid(row.receiver_id),
        row.content,
        row.timestamp,
    )
}

fn clamp_limit(fetch_limit: u64) -> i64 {
    i64::try_from(fetch_limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl MessageStore for PostgresMessageStore {
    async fn append(&self, message: &Message) -> StoreResult<()> {
        let pool = self.pool.clone();
        let new_row = NewMessageRow {
            conversation_id: message.conversation_id().into_inner(),
            timestamp: message.sent_at(),
            message_id: message.id().into_inner(),
            sender_id: message.sender().into_inner(),
            receiver_id: message.receiver().into_inner(),
            content: message.content().to_owned(),
        };

        run_bounded("message.append", self.call_timeout, move || {
            let mut conn = get_conn(&pool)?;
            diesel::insert_into(messages_by_conversation::table)
                .values(&new_row)
                .execute(&mut conn)
                .map_err(|e| StoreUnavailableError::backend("message.append", e))?;
            Ok(())
        })
        .await
    }

    async fn newest(
        &self,
        conversation: ConversationId,
        fetch_limit: u64,
    ) -> StoreResult<Vec<Message>> {
        let pool = self.pool.clone();

        run_bounded("message.newest", self.call_timeout, move || {
            let mut conn = get_conn(&pool)?;
            let rows = messages_by_conversation::table
                .filter(messages_by_conversation::conversation_id.eq(conversation.into_inner()))
                .order((
                    messages_by_conversation::timestamp.desc(),
                    messages_by_conversation::message_id.asc(),
                ))
                .limit(clamp_limit(fetch_limit))
                .select(MessageRow::as_select())
                .load::<MessageRow>(&mut conn)
                .map_err(|e| StoreUnavailableError::backend("message.newest", e))?;
            Ok(rows.into_iter().map(row_to_message).collect())
        })
        .await
    }

    async fn newest_before(
        &self,
        conversation: ConversationId,
        before: DateTime<Utc>,
        fetch_limit: u64,
    ) -> StoreResult<Vec<Message>> {
        let pool = self.pool.clone();

        run_bounded("message.newest_before", self.call_timeout, move || {
            let mut conn = get_conn(&pool)?;
            let rows = messages_by_conversation::table
                .filter(messages_by_conversation::conversation_id.eq(conversation.into_inner()))
                .filter(messages_by_conversation::timestamp.lt(before))
                .order((
                    messages_by_conversation::timestamp.desc(),
                    messages_by_conversation::message_id.asc(),
                ))
                .limit(clamp_limit(fetch_limit))
                .select(MessageRow::as_select())
                .load::<MessageRow>(&mut conn)
                .map_err(|e| StoreUnavailableError::backend("message.newest_before", e))?;
            Ok(rows.into_iter().map(row_to_message).collect())
        })
        .await
    }
}
