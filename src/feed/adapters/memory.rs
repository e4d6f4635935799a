//! In-memory implementation of the `FeedStore` port.
//!
//! One vector per user partition; pushes append (shadowed rows included),
//! reads sort by the ranking comparator and truncate to the fetch limit.
//! Rows sharing the full ranking key are replaced in place, matching the
//! store's last-write-wins clustering semantics.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::feed::domain::FeedEntry;
use crate::feed::ports::repository::FeedStore;
use crate::identity::domain::UserId;
use crate::store::{StoreResult, StoreUnavailableError};

/// In-memory implementation of [`FeedStore`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryFeedStore {
    partitions: Arc<RwLock<HashMap<UserId, Vec<FeedEntry>>>>,
}

impl InMemoryFeedStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of physical rows (shadowed included) in a user's
    /// partition.
    #[must_use]
    pub fn partition_len(&self, user: UserId) -> usize {
        self.partitions
            .read()
            .map(|guard| guard.get(&user).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

fn poisoned(e: impl std::fmt::Display) -> StoreUnavailableError {
    StoreUnavailableError::connection(format!("lock poisoned: {e}"))
}

fn same_ranking_key(a: &FeedEntry, b: &FeedEntry) -> bool {
    a.last_updated_at() == b.last_updated_at() && a.conversation() == b.conversation()
}

#[async_trait]
impl FeedStore for InMemoryFeedStore {
    async fn push(&self, entry: &FeedEntry) -> StoreResult<()> {
        let mut guard = self.partitions.write().map_err(poisoned)?;
        let partition = guard.entry(entry.user()).or_default();
        match partition.iter_mut().find(|e| same_ranking_key(e, entry)) {
            Some(existing) => *existing = entry.clone(),
            None => partition.push(entry.clone()),
        }
        Ok(())
    }

    async fn newest(&self, user: UserId, fetch_limit: u64) -> StoreResult<Vec<FeedEntry>> {
        let guard = self.partitions.read().map_err(poisoned)?;
        let mut rows: Vec<FeedEntry> = guard.get(&user).cloned().unwrap_or_default();
        rows.sort_by(FeedEntry::newest_first);
        rows.truncate(usize::try_from(fetch_limit).unwrap_or(usize::MAX));
        Ok(rows)
    }
}
