//! Shared harness for operation-surface tests: the full service wired over
//! in-memory adapters, with handles onto every store for direct inspection.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::conversation::adapters::memory::InMemoryParticipantRepository;
use crate::conversation::services::ParticipantRegistry;
use crate::feed::adapters::memory::InMemoryFeedStore;
use crate::feed::services::ConversationFeed;
use crate::identity::adapters::memory::InMemoryIdentityRepository;
use crate::identity::domain::{UserId, UserIndex, UserRecord};
use crate::identity::services::IdentityIndex;
use crate::message::adapters::memory::InMemoryMessageStore;
use crate::message::services::MessageLog;
use crate::messaging::services::MessagingService;

pub(super) type TestService = MessagingService<
    InMemoryIdentityRepository,
    InMemoryParticipantRepository,
    InMemoryMessageStore,
    InMemoryFeedStore,
    DefaultClock,
>;

pub(super) struct Harness {
    pub participant_repo: Arc<InMemoryParticipantRepository>,
    pub message_store: Arc<InMemoryMessageStore>,
    pub feed_store: Arc<InMemoryFeedStore>,
    pub service: TestService,
}

pub(super) fn harness() -> Harness {
    let identity_repo = Arc::new(InMemoryIdentityRepository::new());
    let participant_repo = Arc::new(InMemoryParticipantRepository::new());
    let message_store = Arc::new(InMemoryMessageStore::new());
    let feed_store = Arc::new(InMemoryFeedStore::new());

    let service = MessagingService::new(
        IdentityIndex::new(Arc::clone(&identity_repo)),
        ParticipantRegistry::new(Arc::clone(&participant_repo), Arc::new(DefaultClock)),
        MessageLog::new(Arc::clone(&message_store), Arc::new(DefaultClock)),
        ConversationFeed::new(Arc::clone(&feed_store)),
    );

    Harness {
        participant_repo,
        message_store,
        feed_store,
        service,
    }
}

/// Provisions `count` users with dense indices from 0, the way the external
/// bootstrap would.
pub(super) async fn provision_users(harness: &Harness, count: i32) -> Vec<UserRecord> {
    let mut records = Vec::new();
    for i in 0..count {
        let record = UserRecord::new(
            UserId::new(),
            UserIndex::new(i),
            format!("user{i}"),
            format!("Test User {i}"),
            format!("user{i}@example.com"),
        );
        harness
            .service
            .identity()
            .register_user(&record)
            .await
            .expect("user provisioning should succeed");
        records.push(record);
    }
    records
}
