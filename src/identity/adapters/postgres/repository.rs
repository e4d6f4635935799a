//! `PostgreSQL` repository implementation for the identity index.

use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

use super::models::{NewConversationMetadataRow, NewUserDetailsRow, UserDetailsRow};
use super::schema::{conversation_metadata, user_details};
use crate::identity::domain::{ConversationId, ConversationIndex, UserId, UserIndex, UserRecord};
use crate::identity::ports::repository::{
    IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult,
};
use crate::store::{PgPool, StoreUnavailableError, get_conn, run_bounded};

/// `PostgreSQL`-backed identity repository.
///
/// Index lookups go through the unique secondary indexes on `user_index` and
/// `conversation_index`; every other access is a primary-key read. All calls
/// are offloaded to the blocking pool and bounded by the configured call
/// deadline.
#[derive(Debug, Clone)]
pub struct PostgresIdentityRepository {
    pool: PgPool,
    call_timeout: Duration,
}

impl PostgresIdentityRepository {
    /// Creates a new repository from a connection pool and call deadline.
    #[must_use]
    pub const fn new(pool: PgPool, call_timeout: Duration) -> Self {
        Self { pool, call_timeout }
    }
}

fn backend(operation: &'static str) -> impl Fn(DieselError) -> IdentityRepositoryError {
    move |err| IdentityRepositoryError::Store(StoreUnavailableError::backend(operation, err))
}

fn map_register_user_error(err: DieselError, record: &UserRecord) -> IdentityRepositoryError {
    let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info) = err else {
        return IdentityRepositoryError::Store(StoreUnavailableError::backend(
            "identity.register_user",
            err,
        ));
    };

    match info.constraint_name() {
        Some("user_details_user_index_key") => {
            IdentityRepositoryError::DuplicateUserIndex(record.index())
        }
        Some(_) | None => IdentityRepositoryError::DuplicateUser(record.id()),
    }
}

fn row_to_record(row: UserDetailsRow) -> UserRecord {
    UserRecord::new(
        UserId::from_uuid(row.user_id),
        UserIndex::new(row.user_index),
        row.username,
        row.full_name,
        row.email,
    )
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn register_user(&self, record: &UserRecord) -> IdentityRepositoryResult<()> {
        let pool = self.pool.clone();
        let to_insert = record.clone();

        run_bounded("identity.register_user", self.call_timeout, move || {
            let mut conn = get_conn(&pool)?;
            let new_row = NewUserDetailsRow {
                user_id: to_insert.id().into_inner(),
                user_index: to_insert.index().value(),
                username: to_insert.username().to_owned(),
                full_name: to_insert.full_name().to_owned(),
                email: to_insert.email().to_owned(),
            };

            diesel::insert_into(user_details::table)
                .values(&new_row)
                .execute(&mut conn)
                .map_err(|err| map_register_user_error(err, &to_insert))?;
            Ok(())
        })
        .await
    }

    async fn find_user_by_index(
        &self,
        index: UserIndex,
    ) -> IdentityRepositoryResult<Option<UserRecord>> {
        let pool = self.pool.clone();

        run_bounded("identity.find_user_by_index", self.call_timeout, move || {
            let mut conn = get_conn(&pool)?;
            let row = user_details::table
                .filter(user_details::user_index.eq(index.value()))
                .select(UserDetailsRow::as_select())
                .first::<UserDetailsRow>(&mut conn)
                .optional()
                .map_err(backend("identity.find_user_by_index"))?;
            Ok(row.map(row_to_record))
        })
        .await
    }

    async fn find_user_by_id(&self, id: UserId) -> IdentityRepositoryResult<Option<UserRecord>> {
        let pool = self.pool.clone();

        run_bounded("identity.find_user_by_id", self.call_timeout, move || {
            let mut conn = get_conn(&pool)?;
            let row = user_details::table
                .filter(user_details::user_id.eq(id.into_inner()))
                .select(UserDetailsRow::as_select())
                .first::<UserDetailsRow>(&mut conn)
                .optional()
                .map_err(backend("identity.find_user_by_id"))?;
            Ok(row.map(row_to_record))
        })
        .await
    }

    async fn register_conversation(
        &self,
        id: ConversationId,
    ) -> IdentityRepositoryResult<ConversationIndex> {
        let pool = self.pool.clone();

        run_bounded(
            "identity.register_conversation",
            self.call_timeout,
            move || {
                let mut conn = get_conn(&pool)?;

                // Serial allocation happens store-side; a lost insert race
                // resolves to the winner's row on the read-back.
                diesel::insert_into(conversation_metadata::table)
                    .values(&NewConversationMetadataRow {
                        conversation_id: id.into_inner(),
                    })
                    .on_conflict(conversation_metadata::conversation_id)
                    .do_nothing()
                    .execute(&mut conn)
                    .map_err(backend("identity.register_conversation"))?;

                let index = conversation_metadata::table
                    .filter(conversation_metadata::conversation_id.eq(id.into_inner()))
                    .select(conversation_metadata::conversation_index)
                    .first::<i32>(&mut conn)
                    .map_err(backend("identity.register_conversation"))?;
                Ok(ConversationIndex::new(index))
            },
        )
        .await
    }

    async fn find_conversation_by_index(
        &self,
        index: ConversationIndex,
    ) -> IdentityRepositoryResult<Option<ConversationId>> {
        let pool = self.pool.clone();

        run_bounded(
            "identity.find_conversation_by_index",
            self.call_timeout,
            move || {
                let mut conn = get_conn(&pool)?;
                let id = conversation_metadata::table
                    .filter(conversation_metadata::conversation_index.eq(index.value()))
                    .select(conversation_metadata::conversation_id)
                    .first::<uuid::Uuid>(&mut conn)
                    .optional()
                    .map_err(backend("identity.find_conversation_by_index"))?;
                Ok(id.map(ConversationId::from_uuid))
            },
        )
        .await
    }

    async fn find_conversation_by_id(
        &self,
        id: ConversationId,
    ) -> IdentityRepositoryResult<Option<ConversationIndex>> {
        let pool = self.pool.clone();

        run_bounded(
            "identity.find_conversation_by_id",
            self.call_timeout,
            move || {
                let mut conn = get_conn(&pool)?;
                let index = conversation_metadata::table
                    .filter(conversation_metadata::conversation_id.eq(id.into_inner()))
                    .select(conversation_metadata::conversation_index)
                    .first::<i32>(&mut conn)
                    .optional()
                    .map_err(backend("identity.find_conversation_by_id"))?;
                Ok(index.map(ConversationIndex::new))
            },
        )
        .await
    }
}
