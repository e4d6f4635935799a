//! Diesel schema for the conversation feed table.

diesel::table! {
    /// Feed rows, partitioned by user and ranked most-recent-first with a
    /// conversation identifier tie-break.
    conversations_by_user (user_id, last_updated_at, conversation_id) {
        /// Feed owner (partition key).
        user_id -> Uuid,
        /// Snapshot instant (clustering key, descending).
        last_updated_at -> Timestamptz,
        /// Conversation identifier (clustering key, ascending tie-break).
        conversation_id -> Uuid,
        /// Content snapshot of the newest message.
        last_message -> Text,
        /// Participants other than the feed owner.
        other_participants -> Array<Uuid>,
    }
}
