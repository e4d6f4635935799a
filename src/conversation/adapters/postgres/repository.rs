//! `PostgreSQL` repository implementation for conversation membership.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::models::NewParticipantRow;
use super::schema::conversation_participants;
use crate::conversation::domain::ParticipantSet;
use crate::conversation::ports::repository::ParticipantRepository;
use crate::identity::domain::{ConversationId, UserId};
use crate::store::{PgPool, StoreResult, StoreUnavailableError, get_conn, run_bounded};

/// `PostgreSQL`-backed participant repository.
///
/// Membership rows are keyed `(conversation_id, user_id)`; inserts use
/// `ON CONFLICT DO NOTHING` so re-registering a membership keeps the
/// original `joined_at` fact.
#[derive(Debug, Clone)]
pub struct PostgresParticipantRepository {
    pool: PgPool,
    call_timeout: Duration,
}

impl PostgresParticipantRepository {
    /// Creates a new repository from a connection pool and call deadline.
    #[must_use]
    pub const fn new(pool: PgPool, call_timeout: Duration) -> Self {
        Self { pool, call_timeout }
    }
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepository {
    async fn add_participants(
        &self,
        conversation: ConversationId,
        participants: &ParticipantSet,
        joined_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let pool = self.pool.clone();
        let rows: Vec<NewParticipantRow> = participants
            .iter()
            .map(|user| NewParticipantRow {
                conversation_id: conversation.into_inner(),
                user_id: user.into_inner(),
                joined_at,
            })
            .collect();

        run_bounded(
            "conversation.add_participants",
            self.call_timeout,
            move || {
                let mut conn = get_conn(&pool)?;
                diesel::insert_into(conversation_participants::table)
                    .values(&rows)
                    .on_conflict((
                        conversation_participants::conversation_id,
                        conversation_participants::user_id,
                    ))
                    .do_nothing()
                    .execute(&mut conn)
                    .map_err(|e| {
                        StoreUnavailableError::backend("conversation.add_participants", e)
                    })?;
                Ok(())
            },
        )
        .await
    }

    async fn participants_of(&self, conversation: ConversationId) -> StoreResult<Vec<UserId>> {
        let pool = self.pool.clone();

        run_bounded(
            "conversation.participants_of",
            self.call_timeout,
            move || {
                let mut conn = get_conn(&pool)?;
                let users = conversation_participants::table
                    .filter(
                        conversation_participants::conversation_id.eq(conversation.into_inner()),
                    )
                    .order(conversation_participants::user_id.asc())
                    .select(conversation_participants::user_id)
                    .load::<uuid::Uuid>(&mut conn)
                    .map_err(|e| {
                        StoreUnavailableError::backend("conversation.participants_of", e)
                    })?;
                Ok(users.into_iter().map(UserId::from_uuid).collect())
            },
        )
        .await
    }
}
