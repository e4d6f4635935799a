//! Diesel schema for the participant registry table.

diesel::table! {
    /// Conversation membership, partitioned by conversation and clustered
    /// by user identifier.
    conversation_participants (conversation_id, user_id) {
        /// Internal conversation identifier (partition key).
        conversation_id -> Uuid,
        /// Internal user identifier (clustering key).
        user_id -> Uuid,
        /// When the user first joined; write-once.
        joined_at -> Timestamptz,
    }
}
