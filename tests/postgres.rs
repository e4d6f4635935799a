//! `PostgreSQL` adapter integration tests.
//!
//! These tests run only when `TEST_DATABASE_URL` points at a disposable
//! database; they provision the schema idempotently (mirroring the external
//! bootstrap), truncate it, and exercise the full operation surface through
//! the `PostgreSQL` adapters. Without the variable the tests pass as
//! skipped.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]
#![expect(
    clippy::cognitive_complexity,
    reason = "Scenario test walks the whole surface in one flow"
)]

use std::sync::Arc;
use std::time::Duration;

use diesel::RunQueryDsl;
use mockable::DefaultClock;
use tokio::runtime::Runtime;

use ronchamp::conversation::adapters::postgres::PostgresParticipantRepository;
use ronchamp::conversation::services::ParticipantRegistry;
use ronchamp::feed::adapters::postgres::PostgresFeedStore;
use ronchamp::feed::services::ConversationFeed;
use ronchamp::identity::adapters::postgres::PostgresIdentityRepository;
use ronchamp::identity::domain::{UserId, UserIndex, UserRecord};
use ronchamp::identity::services::IdentityIndex;
use ronchamp::message::adapters::postgres::PostgresMessageStore;
use ronchamp::message::services::MessageLog;
use ronchamp::messaging::services::MessagingService;
use ronchamp::store::{PgPool, StoreSettings, build_pool};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS messages_by_conversation (
        conversation_id UUID NOT NULL,
        timestamp TIMESTAMPTZ NOT NULL,
        message_id UUID NOT NULL,
        sender_id UUID NOT NULL,
        receiver_id UUID NOT NULL,
        content TEXT NOT NULL,
        PRIMARY KEY (conversation_id, timestamp, message_id)
    )",
    "CREATE TABLE IF NOT EXISTS conversations_by_user (
        user_id UUID NOT NULL,
        last_updated_at TIMESTAMPTZ NOT NULL,
        conversation_id UUID NOT NULL,
        last_message TEXT NOT NULL,
        other_participants UUID[] NOT NULL,
        PRIMARY KEY (user_id, last_updated_at, conversation_id)
    )",
    "CREATE TABLE IF NOT EXISTS conversation_participants (
        conversation_id UUID NOT NULL,
        user_id UUID NOT NULL,
        joined_at TIMESTAMPTZ NOT NULL,
        PRIMARY KEY (conversation_id, user_id)
    )",
    "CREATE TABLE IF NOT EXISTS user_details (
        user_id UUID PRIMARY KEY,
        user_index INT NOT NULL UNIQUE,
        username TEXT NOT NULL,
        full_name TEXT NOT NULL,
        email TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS conversation_metadata (
        conversation_id UUID PRIMARY KEY,
        conversation_index SERIAL UNIQUE
    )",
];

const TABLES: &[&str] = &[
    "messages_by_conversation",
    "conversations_by_user",
    "conversation_participants",
    "user_details",
    "conversation_metadata",
];

fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

fn prepare_schema(pool: &PgPool) {
    let mut conn = pool.get().expect("connection should be available");
    for statement in SCHEMA {
        diesel::sql_query(*statement)
            .execute(&mut conn)
            .expect("schema bootstrap should succeed");
    }
    for table in TABLES {
        diesel::sql_query(format!("TRUNCATE TABLE {table}"))
            .execute(&mut conn)
            .expect("truncate should succeed");
    }
}

#[test]
fn full_messaging_flow_against_postgres() {
    // Skipped unless a disposable test database is configured.
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        return;
    };

    let rt = test_runtime();
    let settings = StoreSettings::new(url);
    let pool = build_pool(&settings).expect("pool should build");
    prepare_schema(&pool);
    let deadline = settings.call_timeout();

    let identity_repo = Arc::new(PostgresIdentityRepository::new(pool.clone(), deadline));
    let participant_repo = Arc::new(PostgresParticipantRepository::new(pool.clone(), deadline));
    let message_store = Arc::new(PostgresMessageStore::new(pool.clone(), deadline));
    let feed_store = Arc::new(PostgresFeedStore::new(pool, deadline));

    let messaging = MessagingService::new(
        IdentityIndex::new(identity_repo),
        ParticipantRegistry::new(participant_repo, Arc::new(DefaultClock)),
        MessageLog::new(message_store, Arc::new(DefaultClock)),
        ConversationFeed::new(feed_store),
    );

    for i in 0..2 {
        let record = UserRecord::new(
            UserId::new(),
            UserIndex::new(i),
            format!("user{i}"),
            format!("Test User {i}"),
            format!("user{i}@example.com"),
        );
        rt.block_on(messaging.identity().register_user(&record))
            .expect("user provisioning should succeed");
    }

    // First contact creates the conversation and lands in both feeds.
    let receipt = rt
        .block_on(messaging.send_message(UserIndex::new(0), UserIndex::new(1), "hi"))
        .expect("send should succeed");
    for owner in [0, 1] {
        let page = rt
            .block_on(messaging.list_user_conversations(UserIndex::new(owner), 1, 20))
            .expect("listing should succeed");
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].last_message_content, "hi");
    }

    // Replies converge on the same conversation and read newest first.
    std::thread::sleep(Duration::from_millis(5));
    let reply = rt
        .block_on(messaging.send_message(UserIndex::new(1), UserIndex::new(0), "hello back"))
        .expect("reply should succeed");
    assert_eq!(receipt.conversation, reply.conversation);

    let page = rt
        .block_on(messaging.get_conversation_messages(receipt.conversation, 1, 10))
        .expect("messages should succeed");
    let contents: Vec<&str> = page.data.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["hello back", "hi"]);

    // The cursor path excludes the newest row.
    let cursor = page.data[0].sent_at;
    let older = rt
        .block_on(messaging.get_messages_before_timestamp(receipt.conversation, cursor, 1, 10))
        .expect("cursor read should succeed");
    let older_contents: Vec<&str> = older.data.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(older_contents, vec!["hi"]);

    // Membership summary resolves indices in both directions.
    let summary = rt
        .block_on(messaging.get_conversation(receipt.conversation))
        .expect("summary should succeed");
    assert_eq!(summary.participants, vec![UserIndex::new(0), UserIndex::new(1)]);
    assert_eq!(summary.last_message_content.as_deref(), Some("hello back"));
}
