//! In-memory catalog for testing
//!
//! `MockCatalog` serves a fixed list of entries, counts every call, and can
//! delay or fail calls on demand. Delays go through `tokio::time::sleep`, so
//! tests running with a paused clock control completion order exactly.

use super::types::{ItemDetail, ItemSummary, Listing};
use super::{ApiError, CatalogApi, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

const MOCK_REF_PREFIX: &str = "mock://catalog/";

/// Mock catalog with call counting and scripted latency
#[derive(Debug, Default)]
pub struct MockCatalog {
    entries: Vec<ItemDetail>,
    reported_count: Option<usize>,
    list_delays: Mutex<VecDeque<Duration>>,
    detail_delay: Duration,
    failing_lists: AtomicUsize,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    list_requests: Mutex<Vec<(usize, usize)>>,
    detail_requests: Mutex<HashMap<String, usize>>,
}

impl MockCatalog {
    /// Create a catalog from full detail records, in listing order
    #[must_use]
    pub fn new(entries: Vec<ItemDetail>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Create a catalog from names, with deterministic but unordered stats
    ///
    /// Entry `i` (zero-based) gets `order = i + 1` and a height/weight that
    /// are not monotonic in `i`, so sort orders are distinguishable.
    #[must_use]
    pub fn with_names(names: &[&str]) -> Self {
        let entries = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let n = i as u32;
                ItemDetail {
                    name: (*name).to_string(),
                    height: (n * 7) % 13 + 1,
                    weight: (n * 37) % 101 + 10,
                    order: i as i64 + 1,
                    image_url: format!("https://img.test/{}.png", i + 1),
                }
            })
            .collect();
        Self::new(entries)
    }

    /// Report `count` as the catalog total instead of the number of entries
    #[must_use]
    pub const fn with_reported_count(mut self, count: usize) -> Self {
        self.reported_count = Some(count);
        self
    }

    /// Delay successive `list` calls by the given durations, in call order
    ///
    /// Calls beyond the scripted ones complete immediately.
    #[must_use]
    pub fn with_list_delays(self, delays: impl IntoIterator<Item = Duration>) -> Self {
        *lock(&self.list_delays) = delays.into_iter().collect();
        self
    }

    /// Delay every `detail` call by `delay`
    #[must_use]
    pub const fn with_detail_delay(mut self, delay: Duration) -> Self {
        self.detail_delay = delay;
        self
    }

    /// Make the next `n` `list` calls fail with `ApiError::Unavailable`
    pub fn fail_next_lists(&self, n: usize) {
        self.failing_lists.store(n, Ordering::SeqCst);
    }

    /// Detail reference of the entry at `index`
    #[must_use]
    pub fn detail_ref(index: usize) -> String {
        format!("{MOCK_REF_PREFIX}{}/", index + 1)
    }

    /// Summary of the entry at `index`, if it exists
    #[must_use]
    pub fn summary(&self, index: usize) -> Option<ItemSummary> {
        self.entries
            .get(index)
            .map(|e| ItemSummary::new(e.name.clone(), Self::detail_ref(index)))
    }

    /// Entries in listing order
    #[must_use]
    pub fn entries(&self) -> &[ItemDetail] {
        &self.entries
    }

    /// Number of `list` calls served (including failures)
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `detail` calls served (including failures)
    #[must_use]
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    /// Number of `detail` calls for one reference
    #[must_use]
    pub fn detail_calls_for(&self, detail_ref: &str) -> usize {
        lock(&self.detail_requests)
            .get(detail_ref)
            .copied()
            .unwrap_or(0)
    }

    /// `(limit, offset)` of every `list` call, in call order
    #[must_use]
    pub fn list_requests(&self) -> Vec<(usize, usize)> {
        lock(&self.list_requests).clone()
    }

    fn index_of(detail_ref: &str) -> Option<usize> {
        detail_ref
            .strip_prefix(MOCK_REF_PREFIX)?
            .trim_end_matches('/')
            .parse::<usize>()
            .ok()?
            .checked_sub(1)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn list(&self, limit: usize, offset: usize) -> Result<Listing> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.list_requests).push((limit, offset));

        let delay = lock(&self.list_delays).pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let should_fail = self
            .failing_lists
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(ApiError::Unavailable("scripted listing failure".to_string()));
        }

        let items = (offset..self.entries.len())
            .take(limit)
            .filter_map(|i| self.summary(i))
            .collect();

        Ok(Listing {
            count: self.reported_count.unwrap_or(self.entries.len()),
            items,
        })
    }

    async fn detail(&self, detail_ref: &str) -> Result<ItemDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        *lock(&self.detail_requests)
            .entry(detail_ref.to_string())
            .or_insert(0) += 1;

        if !self.detail_delay.is_zero() {
            tokio::time::sleep(self.detail_delay).await;
        }

        Self::index_of(detail_ref)
            .and_then(|i| self.entries.get(i).cloned())
            .ok_or_else(|| ApiError::Status {
                url: detail_ref.to_string(),
                status: 404,
            })
    }
}
