//! Behavioural integration tests for the composed messaging surface.
//!
//! These tests exercise the full operation surface over the in-memory
//! adapters: provisioning, first-contact sends, fan-out, pagination, and
//! identity round trips.

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
    reason = "Test functions may have higher complexity for full scenario coverage"
)]

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use tokio::runtime::Runtime;

use ronchamp::conversation::adapters::memory::InMemoryParticipantRepository;
use ronchamp::conversation::services::ParticipantRegistry;
use ronchamp::feed::adapters::memory::InMemoryFeedStore;
use ronchamp::feed::services::ConversationFeed;
use ronchamp::identity::adapters::memory::InMemoryIdentityRepository;
use ronchamp::identity::domain::{UserId, UserIndex, UserRecord};
use ronchamp::identity::services::IdentityIndex;
use ronchamp::message::adapters::memory::InMemoryMessageStore;
use ronchamp::message::domain::MessageId;
use ronchamp::message::services::MessageLog;
use ronchamp::messaging::services::MessagingService;

type InMemoryMessaging = MessagingService<
    InMemoryIdentityRepository,
    InMemoryParticipantRepository,
    InMemoryMessageStore,
    InMemoryFeedStore,
    DefaultClock,
>;

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

fn service() -> InMemoryMessaging {
    env_logger::builder().is_test(true).try_init().ok();
    MessagingService::new(
        IdentityIndex::new(Arc::new(InMemoryIdentityRepository::new())),
        ParticipantRegistry::new(
            Arc::new(InMemoryParticipantRepository::new()),
            Arc::new(DefaultClock),
        ),
        MessageLog::new(Arc::new(InMemoryMessageStore::new()), Arc::new(DefaultClock)),
        ConversationFeed::new(Arc::new(InMemoryFeedStore::new())),
    )
}

fn provision(rt: &Runtime, messaging: &InMemoryMessaging, count: i32) -> Vec<UserRecord> {
    (0..count)
        .map(|i| {
            let record = UserRecord::new(
                UserId::new(),
                UserIndex::new(i),
                format!("user{i}"),
                format!("Test User {i}"),
                format!("user{i}@example.com"),
            );
            rt.block_on(messaging.identity().register_user(&record))
                .expect("user provisioning should succeed");
            record
        })
        .collect()
}

/// Two users with no prior conversation: one send creates the conversation
/// and both users see exactly one feed entry carrying the content.
#[test]
fn first_contact_send_populates_both_feeds() {
    let rt = test_runtime();
    let messaging = service();
    provision(&rt, &messaging, 2);

    let receipt = rt
        .block_on(messaging.send_message(UserIndex::new(0), UserIndex::new(1), "hi"))
        .expect("send should succeed");

    for owner in [0, 1] {
        let page = rt
            .block_on(messaging.list_user_conversations(UserIndex::new(owner), 1, 20))
            .expect("listing should succeed");
        assert_eq!(page.total, 1, "user {owner} should see one conversation");
        assert_eq!(page.data[0].last_message_content, "hi");
        assert_eq!(page.data[0].conversation, receipt.conversation);
    }
}

/// Round trip: a user index resolves to a record whose identifier resolves
/// back to the same index, and likewise for conversations.
#[test]
fn identity_round_trips_preserve_the_index() {
    let rt = test_runtime();
    let messaging = service();
    provision(&rt, &messaging, 3);

    for i in 0..3 {
        let record = rt
            .block_on(messaging.identity().resolve_user_index(UserIndex::new(i)))
            .expect("index lookup should succeed");
        let back = rt
            .block_on(messaging.identity().resolve_user_id(record.id()))
            .expect("identifier lookup should succeed");
        assert_eq!(back.index(), UserIndex::new(i));
    }

    let receipt = rt
        .block_on(messaging.send_message(UserIndex::new(0), UserIndex::new(1), "ping"))
        .expect("send should succeed");
    let conversation_id = rt
        .block_on(
            messaging
                .identity()
                .resolve_conversation_index(receipt.conversation),
        )
        .expect("index lookup should succeed");
    let back = rt
        .block_on(messaging.identity().resolve_conversation_id(conversation_id))
        .expect("identifier lookup should succeed");
    assert_eq!(back, receipt.conversation);
}

/// Messages inserted at T1 < T2 < T3 come back newest first.
#[test]
fn conversation_history_reads_newest_first() {
    let rt = test_runtime();
    let messaging = service();
    provision(&rt, &messaging, 2);

    for content in ["t1", "t2", "t3"] {
        rt.block_on(messaging.send_message(UserIndex::new(0), UserIndex::new(1), content))
            .expect("send should succeed");
        std::thread::sleep(Duration::from_millis(5));
    }

    let conversation = rt
        .block_on(messaging.list_user_conversations(UserIndex::new(0), 1, 1))
        .expect("listing should succeed")
        .data[0]
        .conversation;
    let page = rt
        .block_on(messaging.get_conversation_messages(conversation, 1, 3))
        .expect("messages should succeed");

    let contents: Vec<&str> = page.data.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["t3", "t2", "t1"]);
}

/// Offset pages never exceed the limit and never repeat a message.
#[test]
fn offset_pagination_is_duplicate_free() {
    let rt = test_runtime();
    let messaging = service();
    provision(&rt, &messaging, 2);

    for i in 0..7 {
        rt.block_on(messaging.send_message(
            UserIndex::new(0),
            UserIndex::new(1),
            &format!("m{i}"),
        ))
        .expect("send should succeed");
        std::thread::sleep(Duration::from_millis(2));
    }

    let conversation = rt
        .block_on(messaging.list_user_conversations(UserIndex::new(1), 1, 1))
        .expect("listing should succeed")
        .data[0]
        .conversation;

    let mut seen: HashSet<MessageId> = HashSet::new();
    for page_number in 1..=4 {
        let page = rt
            .block_on(messaging.get_conversation_messages(conversation, page_number, 2))
            .expect("messages should succeed");
        assert!(page.data.len() <= 2);
        for message in &page.data {
            assert!(seen.insert(message.id), "duplicate message across pages");
        }
    }
    assert_eq!(seen.len(), 7);
}

/// Sequential sends between the same pair converge on a single
/// conversation, whichever direction they travel.
#[test]
fn sequential_sends_converge_on_one_conversation() {
    let rt = test_runtime();
    let messaging = service();
    provision(&rt, &messaging, 2);

    let first = rt
        .block_on(messaging.send_message(UserIndex::new(0), UserIndex::new(1), "hello"))
        .expect("send should succeed");
    std::thread::sleep(Duration::from_millis(5));
    let reply = rt
        .block_on(messaging.send_message(UserIndex::new(1), UserIndex::new(0), "hello back"))
        .expect("reply should succeed");

    assert_eq!(first.conversation, reply.conversation);

    // The newest entry ranks first in both feeds; the superseded row is
    // still physically present behind it.
    let page = rt
        .block_on(messaging.list_user_conversations(UserIndex::new(0), 1, 20))
        .expect("listing should succeed");
    assert_eq!(page.data[0].last_message_content, "hello back");

    let summary = rt
        .block_on(messaging.get_conversation(first.conversation))
        .expect("summary should succeed");
    assert_eq!(summary.participants, vec![UserIndex::new(0), UserIndex::new(1)]);
    assert_eq!(summary.last_message_content.as_deref(), Some("hello back"));
}
