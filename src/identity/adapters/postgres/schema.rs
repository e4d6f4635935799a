//! Diesel schema for the identity tables.
//!
//! Both tables are single-row partitions keyed by the internal identifier;
//! the index columns carry unique secondary indexes so the reverse lookup
//! stays O(1) without scanning.

diesel::table! {
    /// Provisioned user records, keyed by internal identifier.
    user_details (user_id) {
        /// Internal user identifier (partition key).
        user_id -> Uuid,
        /// Dense external index, unique across users.
        user_index -> Int4,
        /// Login name.
        username -> Text,
        /// Display name.
        full_name -> Text,
        /// Contact address.
        email -> Text,
    }
}

diesel::table! {
    /// Conversation index mappings, keyed by internal identifier.
    conversation_metadata (conversation_id) {
        /// Internal conversation identifier (partition key).
        conversation_id -> Uuid,
        /// Dense external index, allocated serially by the store.
        conversation_index -> Int4,
    }
}
