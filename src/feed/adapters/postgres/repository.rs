//! `PostgreSQL` repository implementation for the conversation feed.

use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;

use super::models::{FeedRow, NewFeedRow};
use super::schema::conversations_by_user;
use crate::feed::domain::FeedEntry;
use crate::feed::ports::repository::FeedStore;
use crate::identity::domain::{ConversationId, UserId};
use crate::store::{PgPool, StoreResult, StoreUnavailableError, get_conn, run_bounded};

/// `PostgreSQL`-backed feed store.
///
/// Pushes insert newer-ranked rows; a push landing on an existing full
/// ranking key updates the payload in place, reproducing the store's
/// last-write-wins clustering semantics.
#[derive(Debug, Clone)]
pub struct PostgresFeedStore {
    pool: PgPool,
    call_timeout: Duration,
}

impl PostgresFeedStore {
    /// Creates a new store from a connection pool and call deadline.
    #[must_use]
    pub const fn new(pool: PgPool, call_timeout: Duration) -> Self {
        Self { pool, call_timeout }
    }
}

fn row_to_entry(row: FeedRow) -> FeedEntry {
    FeedEntry::new(
        UserId::from_uuid(row.user_id),
        ConversationId::from_uuid(row.conversation_id),
        row.last_updated_at,
        row.last_message,
        row.other_participants.into_iter().map(UserId::from_uuid),
    )
}

#[async_trait]
impl FeedStore for PostgresFeedStore {
    async fn push(&self, entry: &FeedEntry) -> StoreResult<()> {
        let pool = self.pool.clone();
        let new_row = NewFeedRow {
            user_id: entry.user().into_inner(),
            last_updated_at: entry.last_updated_at(),
            conversation_id: entry.conversation().into_inner(),
            last_message: entry.last_message().to_owned(),
            other_participants: entry
                .other_participants()
                .iter()
                .map(|user| user.into_inner())
                .collect(),
        };

        run_bounded("feed.push", self.call_timeout, move || {
            let mut conn = get_conn(&pool)?;
            diesel::insert_into(conversations_by_user::table)
                .values(&new_row)
                .on_conflict((
                    conversations_by_user::user_id,
                    conversations_by_user::last_updated_at,
                    conversations_by_user::conversation_id,
                ))
                .do_update()
                .set((
                    conversations_by_user::last_message
                        .eq(diesel::upsert::excluded(conversations_by_user::last_message)),
                    conversations_by_user::other_participants.eq(diesel::upsert::excluded(
                        conversations_by_user::other_participants,
                    )),
                ))
                .execute(&mut conn)
                .map_err(|e| StoreUnavailableError::backend("feed.push", e))?;
            Ok(())
        })
        .await
    }

    async fn newest(&self, user: UserId, fetch_limit: u64) -> StoreResult<Vec<FeedEntry>> {
        let pool = self.pool.clone();

        run_bounded("feed.newest", self.call_timeout, move || {
            let mut conn = get_conn(&pool)?;
            let rows = conversations_by_user::table
                .filter(conversations_by_user::user_id.eq(user.into_inner()))
                .order((
                    conversations_by_user::last_updated_at.desc(),
                    conversations_by_user::conversation_id.asc(),
                ))
                .limit(i64::try_from(fetch_limit).unwrap_or(i64::MAX))
                .select(FeedRow::as_select())
                .load::<FeedRow>(&mut conn)
                .map_err(|e| StoreUnavailableError::backend("feed.newest", e))?;
            Ok(rows.into_iter().map(row_to_entry).collect())
        })
        .await
    }
}
