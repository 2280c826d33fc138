//! Ranked store holding leaderboard records, with live subscriptions.
//!
//! The app talks to the store only through [`RankedStore`]. [`MemoryStore`] is the
//! in-process implementation: appends are stamped with the store clock and every live
//! subscription on the collection receives a fresh snapshot of the most recent records.
//! Snapshots queue up in the subscription until the reader drains them, so delivery is
//! decoupled from the reader's frame loop.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::error::{AppError, AppResult};
use crate::now_millis;

pub type RecordId = u64;

/// A submitted score. Never mutated after the store accepts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub id: RecordId,
    pub identity: String,
    pub score: u64,
    /// Store-assigned, milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

/// Fields supplied by the client on append; the store adds id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    pub identity: String,
    pub score: u64,
}

/// Most-recent-first list of at most `max_count` entries.
pub type Snapshot = Vec<LeaderboardEntry>;

pub trait RankedStore: Send + Sync {
    /// Starts a live query on `collection`. The current snapshot is queued immediately.
    fn subscribe(&self, collection: &str, max_count: usize) -> AppResult<Subscription>;

    fn append(&self, collection: &str, record: NewScore) -> AppResult<RecordId>;
}

#[derive(Default)]
struct Feed {
    active: bool,
    pending: VecDeque<AppResult<Snapshot>>,
}

/// Handle to a live query. Dropping it unsubscribes.
pub struct Subscription {
    feed: Arc<Mutex<Feed>>,
}

impl Subscription {
    fn new() -> Self {
        Self {
            feed: Arc::new(Mutex::new(Feed {
                active: true,
                pending: VecDeque::new(),
            })),
        }
    }

    pub fn is_active(&self) -> bool {
        self.feed.lock().active
    }

    /// Drains every queued delivery and returns the newest one.
    ///
    /// A sync error wins over snapshots queued alongside it since the feed stops after
    /// an error.
    pub fn latest(&self) -> Option<AppResult<Snapshot>> {
        let mut feed = self.feed.lock();
        let mut newest = None;
        for delivery in feed.pending.drain(..) {
            match delivery {
                Err(e) => return Some(Err(e)),
                Ok(snapshot) => newest = Some(Ok(snapshot)),
            }
        }
        newest
    }

    /// Stops delivery and discards anything still queued.
    pub fn unsubscribe(&self) {
        let mut feed = self.feed.lock();
        feed.active = false;
        feed.pending.clear();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

struct Subscriber {
    collection: String,
    max_count: usize,
    feed: Weak<Mutex<Feed>>,
}

#[derive(Default)]
struct StoreInner {
    collections: HashMap<String, Vec<LeaderboardEntry>>,
    subscribers: Vec<Subscriber>,
    next_id: RecordId,
    reject_writes: bool,
}

impl StoreInner {
    fn snapshot(&self, collection: &str, max_count: usize) -> Snapshot {
        let Some(entries) = self.collections.get(collection) else {
            return Vec::new();
        };
        // Entries are kept in append order, so the tail is the most recent.
        entries.iter().rev().take(max_count).cloned().collect()
    }

    fn notify(&mut self, collection: &str) {
        let mut deliveries = Vec::new();
        self.subscribers.retain(|sub| {
            let Some(feed) = sub.feed.upgrade() else {
                return false;
            };
            if !feed.lock().active {
                return false;
            }
            if sub.collection == collection {
                deliveries.push((feed, sub.max_count));
            }
            true
        });
        for (feed, max_count) in deliveries {
            let snapshot = self.snapshot(collection, max_count);
            let mut feed = feed.lock();
            if feed.active {
                feed.pending.push_back(Ok(snapshot));
            }
        }
    }
}

/// In-process ranked store. Cloning shares the same records.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent append fail, as a remote permission rule would.
    pub fn set_reject_writes(&self, reject: bool) {
        self.inner.lock().reject_writes = reject;
    }

    /// Ends every live subscription on `collection` with a sync error.
    pub fn disconnect(&self, collection: &str, reason: &str) {
        let mut inner = self.inner.lock();
        inner.subscribers.retain(|sub| {
            if sub.collection != collection {
                return true;
            }
            if let Some(feed) = sub.feed.upgrade() {
                let mut feed = feed.lock();
                if feed.active {
                    feed.pending.push_back(Err(AppError::SyncFailure(reason.to_string())));
                    feed.active = false;
                }
            }
            false
        });
        log::warn!("Disconnected subscribers of {collection}: {reason}");
    }

    pub fn subscriber_count(&self) -> usize {
        let inner = self.inner.lock();
        inner
            .subscribers
            .iter()
            .filter(|sub| sub.feed.upgrade().is_some_and(|feed| feed.lock().active))
            .count()
    }

    pub fn len(&self, collection: &str) -> usize {
        self.inner
            .lock()
            .collections
            .get(collection)
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

impl RankedStore for MemoryStore {
    fn subscribe(&self, collection: &str, max_count: usize) -> AppResult<Subscription> {
        if collection.is_empty() {
            return Err(AppError::SyncFailure("collection path is empty".into()));
        }
        if max_count == 0 {
            return Err(AppError::SyncFailure("max count must be at least 1".into()));
        }
        let subscription = Subscription::new();
        let mut inner = self.inner.lock();
        let initial = inner.snapshot(collection, max_count);
        subscription.feed.lock().pending.push_back(Ok(initial));
        inner.subscribers.push(Subscriber {
            collection: collection.to_string(),
            max_count,
            feed: Arc::downgrade(&subscription.feed),
        });
        log::debug!("New subscription on {collection} (max {max_count})");
        Ok(subscription)
    }

    fn append(&self, collection: &str, record: NewScore) -> AppResult<RecordId> {
        let mut inner = self.inner.lock();
        if inner.reject_writes {
            return Err(AppError::submit("write rejected by store"));
        }
        let id = inner.next_id;
        inner.next_id += 1;
        let entry = LeaderboardEntry {
            id,
            identity: record.identity,
            score: record.score,
            timestamp_ms: now_millis(),
        };
        log::info!(
            "Appended record {} to {collection}: {} scored {}",
            entry.id,
            entry.identity,
            entry.score
        );
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(entry);
        inner.notify(collection);
        Ok(id)
    }
}
