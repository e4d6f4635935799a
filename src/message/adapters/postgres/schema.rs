//! Diesel schema for the message log table.

diesel::table! {
    /// Message rows, partitioned by conversation and clustered newest-first
    /// by send instant with identifier tie-break.
    messages_by_conversation (conversation_id, timestamp, message_id) {
        /// Internal conversation identifier (partition key).
        conversation_id -> Uuid,
        /// Send instant (clustering key, descending).
        timestamp -> Timestamptz,
        /// Message identifier (clustering key, ascending tie-break).
        message_id -> Uuid,
        /// Sending user.
        sender_id -> Uuid,
        /// Receiving user.
        receiver_id -> Uuid,
        /// Message body.
        content -> Text,
    }
}
