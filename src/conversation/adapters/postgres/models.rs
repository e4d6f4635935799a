//! Diesel row models for conversation membership.

use super::schema::conversation_participants;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Insert model for membership rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = conversation_participants)]
pub(super) struct NewParticipantRow {
    pub conversation_id: Uuid,
    pub user_id: Uuid,
    pub joined_at: DateTime<Utc>,
}
