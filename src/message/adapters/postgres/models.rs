//! Diesel row models for message log persistence.

use super::schema::messages_by_conversation;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Query result row for message records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = messages_by_conversation)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct MessageRow {
    pub conversation_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub message_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
}

/// Insert model for message records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages_by_conversation)]
pub(super) struct NewMessageRow {
    pub conversation_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub message_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
}
