//! Diesel row models for identity persistence.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain.

use super::schema::{conversation_metadata, user_details};
use diesel::prelude::*;
use uuid::Uuid;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_details)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(super) struct UserDetailsRow {
    pub user_id: Uuid,
    pub user_index: i32,
    pub username: String,
    pub full_name: String,
    pub email: String,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_details)]
pub(super) struct NewUserDetailsRow {
    pub user_id: Uuid,
    pub user_index: i32,
    pub username: String,
    pub full_name: String,
    pub email: String,
}

/// Insert model for conversation index mappings.
///
/// The index column is omitted: the store allocates it serially.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = conversation_metadata)]
pub(super) struct NewConversationMetadataRow {
    pub conversation_id: Uuid,
}
