//! Tests for the read operations: feeds, summaries, message pages.

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use rstest::rstest;
use uuid::Uuid;

use super::support::{Harness, harness, provision_users};
use crate::conversation::domain::ParticipantSet;
use crate::conversation::ports::repository::ParticipantRepository;
use crate::feed::domain::FeedEntry;
use crate::feed::ports::repository::FeedStore;
use crate::identity::domain::{ConversationId, ConversationIndex, UserIndex, UserRecord};
use crate::message::domain::MessageId;
use crate::messaging::error::{MessagingError, NotFoundError, ValidationError};
use crate::pagination::InvalidPageRequest;

/// Sends with a short pause so consecutive messages get distinct instants.
async fn send_spaced(h: &Harness, sender: i32, receiver: i32, content: &str) {
    h.service
        .send_message(UserIndex::new(sender), UserIndex::new(receiver), content)
        .await
        .expect("send should succeed");
    tokio::time::sleep(Duration::from_millis(5)).await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_message_lands_in_both_feeds() {
    let h = harness();
    provision_users(&h, 2).await;

    h.service
        .send_message(UserIndex::new(0), UserIndex::new(1), "hi")
        .await
        .expect("send should succeed");

    for (owner, other) in [(0, 1), (1, 0)] {
        let page = h
            .service
            .list_user_conversations(UserIndex::new(owner), 1, 20)
            .await
            .expect("listing should succeed");

        assert_eq!(page.total, 1);
        assert_eq!(page.skipped, 0);
        let entry = page.data.first().expect("one feed entry");
        assert_eq!(entry.last_message_content, "hi");
        assert_eq!(entry.other_participants, vec![UserIndex::new(other)]);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_an_unknown_user_is_not_found() {
    let h = harness();

    let result = h
        .service
        .list_user_conversations(UserIndex::new(0), 1, 20)
        .await;

    assert!(matches!(
        result,
        Err(MessagingError::NotFound(NotFoundError::UserIndex(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn zero_page_parameters_are_rejected() {
    let h = harness();
    provision_users(&h, 1).await;

    let zero_page = h
        .service
        .list_user_conversations(UserIndex::new(0), 0, 20)
        .await;
    let zero_limit = h
        .service
        .list_user_conversations(UserIndex::new(0), 1, 0)
        .await;

    assert!(matches!(
        zero_page,
        Err(MessagingError::Validation(ValidationError::Page(
            InvalidPageRequest::ZeroPage
        )))
    ));
    assert!(matches!(
        zero_limit,
        Err(MessagingError::Validation(ValidationError::Page(
            InvalidPageRequest::ZeroLimit
        )))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn conversation_summary_names_all_participants() {
    let h = harness();
    provision_users(&h, 2).await;

    let receipt = h
        .service
        .send_message(UserIndex::new(1), UserIndex::new(0), "hi")
        .await
        .expect("send should succeed");
    let summary = h
        .service
        .get_conversation(receipt.conversation)
        .await
        .expect("summary should succeed");

    assert_eq!(summary.conversation, receipt.conversation);
    assert_eq!(summary.participants, vec![UserIndex::new(0), UserIndex::new(1)]);
    assert_eq!(summary.last_message_content.as_deref(), Some("hi"));
    assert!(summary.last_message_at.is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_conversation_index_is_not_found() {
    let h = harness();

    let result = h.service.get_conversation(ConversationIndex::new(41)).await;

    assert!(matches!(
        result,
        Err(MessagingError::NotFound(NotFoundError::ConversationIndex(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn message_page_reads_newest_first() {
    let h = harness();
    provision_users(&h, 2).await;
    send_spaced(&h, 0, 1, "t1").await;
    send_spaced(&h, 0, 1, "t2").await;
    send_spaced(&h, 0, 1, "t3").await;

    let conversation = h
        .service
        .list_user_conversations(UserIndex::new(0), 1, 1)
        .await
        .expect("listing should succeed")
        .data
        .first()
        .expect("one feed entry")
        .conversation;

    let page = h
        .service
        .get_conversation_messages(conversation, 1, 3)
        .await
        .expect("messages should succeed");

    let contents: Vec<&str> = page.data.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["t3", "t2", "t1"]);
    assert_eq!(page.total, 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn send_then_read_returns_the_content_first() {
    let h = harness();
    provision_users(&h, 2).await;
    let before_send = Utc::now();

    let receipt = h
        .service
        .send_message(UserIndex::new(0), UserIndex::new(1), "fresh")
        .await
        .expect("send should succeed");
    let page = h
        .service
        .get_conversation_messages(receipt.conversation, 1, 20)
        .await
        .expect("messages should succeed");

    let head = page.data.first().expect("one message");
    assert_eq!(head.content, "fresh");
    assert!(head.sent_at >= before_send);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cursor_walk_covers_history_without_duplicates() {
    let h = harness();
    provision_users(&h, 2).await;
    for i in 0..4 {
        send_spaced(&h, 0, 1, &format!("m{i}")).await;
    }

    let conversation = h
        .service
        .list_user_conversations(UserIndex::new(0), 1, 1)
        .await
        .expect("listing should succeed")
        .data
        .first()
        .expect("one feed entry")
        .conversation;

    let mut seen: HashSet<MessageId> = HashSet::new();
    let mut cursor = None;
    loop {
        let page = match cursor {
            None => h
                .service
                .get_conversation_messages(conversation, 1, 2)
                .await
                .expect("messages should succeed"),
            Some(before) => h
                .service
                .get_messages_before_timestamp(conversation, before, 1, 2)
                .await
                .expect("messages should succeed"),
        };
        if page.data.is_empty() {
            break;
        }
        assert!(page.data.len() <= 2);
        for message in &page.data {
            assert!(seen.insert(message.id), "duplicate message across pages");
        }
        cursor = page.data.last().map(|m| m.sent_at);
    }

    assert_eq!(seen.len(), 4);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn conversation_with_no_messages_reads_as_empty_page() {
    let h = harness();
    let users = provision_users(&h, 2).await;

    // A conversation provisioned without any send: membership and index
    // mapping exist, the log partition does not.
    let participants = ParticipantSet::new(users.iter().map(UserRecord::id))
        .expect("two distinct users");
    let conversation_id = participants.conversation_id();
    h.participant_repo
        .add_participants(conversation_id, &participants, Utc::now())
        .await
        .expect("membership insert should succeed");
    let conversation = h
        .service
        .identity()
        .register_conversation(conversation_id)
        .await
        .expect("registration should succeed");

    let page = h
        .service
        .get_conversation_messages(conversation, 1, 20)
        .await
        .expect("messages should succeed");

    assert_eq!(page.total, 0);
    assert!(page.data.is_empty());
    assert_eq!(page.skipped, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unresolvable_feed_rows_are_skipped_and_counted() {
    let h = harness();
    let users = provision_users(&h, 2).await;
    h.service
        .send_message(UserIndex::new(0), UserIndex::new(1), "hi")
        .await
        .expect("send should succeed");

    // A stray feed row referencing a conversation the identity index has
    // never seen: the read must skip it, count it, and keep the page alive.
    let owner = users.first().expect("provisioned user");
    let stray = FeedEntry::new(
        owner.id(),
        ConversationId::from_uuid(Uuid::new_v4()),
        Utc::now(),
        "ghost",
        [users.get(1).expect("second user").id()],
    );
    h.feed_store.push(&stray).await.expect("push should succeed");

    let page = h
        .service
        .list_user_conversations(UserIndex::new(0), 1, 20)
        .await
        .expect("listing should succeed");

    assert_eq!(page.total, 1);
    assert_eq!(page.skipped, 1);
}
