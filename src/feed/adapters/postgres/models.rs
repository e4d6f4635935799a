//! Diesel row models for conversation feed persistence.

use super::schema::conversations_by_user;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Query result row for feed records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = conversations_by_user)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct FeedRow {
    pub user_id: Uuid,
    pub last_updated_at: DateTime<Utc>,
    pub conversation_id: Uuid,
    pub last_message: String,
    pub other_participants: Vec<Uuid>,
}

/// Insert model for feed records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = conversations_by_user)]
pub(super) struct NewFeedRow {
    pub user_id: Uuid,
    pub last_updated_at: DateTime<Utc>,
    pub conversation_id: Uuid,
    pub last_message: String,
    pub other_participants: Vec<Uuid>,
}
