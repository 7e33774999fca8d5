//! Detail record cache

use crate::api::{CatalogApi, ItemDetail, ItemSummary};
use crate::error::GalleryError;
use futures::stream::{self, StreamExt, TryStreamExt};
use moka::future::Cache;

/// Session-lifetime cache of detail records keyed by detail reference
///
/// Clones share the same storage, so a page fetcher and a search index built
/// from clones of one `DetailCache` see each other's entries. Concurrent
/// misses on one key are coalesced: the first caller performs the fetch and
/// every other caller waits for its result.
#[derive(Clone)]
pub struct DetailCache {
    cache: Cache<String, ItemDetail>,
}

impl DetailCache {
    /// Create an empty, unbounded cache
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
        }
    }

    /// Look up a cached record without fetching
    pub async fn get(&self, detail_ref: &str) -> Option<ItemDetail> {
        self.cache.get(detail_ref).await
    }

    /// Store a record under `detail_ref`
    pub async fn insert(&self, detail_ref: impl Into<String>, detail: ItemDetail) {
        self.cache.insert(detail_ref.into(), detail).await;
    }

    /// Whether a record is cached under `detail_ref`
    #[must_use]
    pub fn contains(&self, detail_ref: &str) -> bool {
        self.cache.contains_key(detail_ref)
    }

    /// Return the cached record for `summary`, fetching it on a miss
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::Transport` if the fetch fails. A failed fetch
    /// is not cached, so a later call retries.
    pub async fn get_or_fetch<C>(&self, api: &C, summary: &ItemSummary) -> Result<ItemDetail, GalleryError>
    where
        C: CatalogApi + ?Sized,
    {
        let detail_ref = summary.detail_ref.as_str();
        self.cache
            .try_get_with(detail_ref.to_string(), async {
                tracing::debug!(detail_ref, name = %summary.name, "detail cache miss");
                api.detail(detail_ref).await
            })
            .await
            .map_err(GalleryError::Transport)
    }

    /// Resolve details for `summaries`, keeping their order
    ///
    /// At most `max_in_flight` lookups run at once.
    ///
    /// # Errors
    ///
    /// Returns the first `GalleryError::Transport` encountered.
    pub async fn resolve_all<C>(
        &self,
        api: &C,
        summaries: &[ItemSummary],
        max_in_flight: usize,
    ) -> Result<Vec<ItemDetail>, GalleryError>
    where
        C: CatalogApi + ?Sized,
    {
        stream::iter(summaries)
            .map(|summary| self.get_or_fetch(api, summary))
            .buffered(max_in_flight.max(1))
            .try_collect()
            .await
    }

    /// Number of cached records
    ///
    /// Pending writes are applied first so the count is exact.
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    /// Drop every cached record
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for DetailCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockCatalog;
    use std::time::Duration;

    #[tokio::test]
    async fn test_miss_fetches_then_hit_is_free() {
        let catalog = MockCatalog::with_names(&["bulbasaur", "ivysaur"]);
        let cache = DetailCache::new();
        let summary = catalog.summary(0).unwrap();

        let first = cache.get_or_fetch(&catalog, &summary).await.unwrap();
        let second = cache.get_or_fetch(&catalog, &summary).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.name, "bulbasaur");
        assert_eq!(catalog.detail_calls(), 1);
        assert!(cache.contains(&summary.detail_ref));
    }

    #[tokio::test]
    async fn test_prepopulated_key_skips_network() {
        let catalog = MockCatalog::with_names(&["bulbasaur"]);
        let cache = DetailCache::new();
        let summary = catalog.summary(0).unwrap();

        let seeded = ItemDetail {
            name: "seeded".to_string(),
            height: 1,
            weight: 2,
            order: 3,
            image_url: "seed.png".to_string(),
        };
        cache.insert(summary.detail_ref.clone(), seeded.clone()).await;

        let detail = cache.get_or_fetch(&catalog, &summary).await.unwrap();
        assert_eq!(detail, seeded);
        assert_eq!(catalog.detail_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_misses_share_one_fetch() {
        let catalog = MockCatalog::with_names(&["pikachu"])
            .with_detail_delay(Duration::from_millis(200));
        let cache = DetailCache::new();
        let summary = catalog.summary(0).unwrap();

        let (a, b, c, d) = tokio::join!(
            cache.get_or_fetch(&catalog, &summary),
            cache.get_or_fetch(&catalog, &summary),
            cache.get_or_fetch(&catalog, &summary),
            cache.get_or_fetch(&catalog, &summary),
        );

        for result in [a, b, c, d] {
            assert_eq!(result.unwrap().name, "pikachu");
        }
        assert_eq!(catalog.detail_calls_for(&summary.detail_ref), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let catalog = MockCatalog::with_names(&["pikachu"]);
        let cache = DetailCache::new();
        let missing = ItemSummary::new("ghost", "mock://catalog/99/");

        assert!(cache.get_or_fetch(&catalog, &missing).await.is_err());
        assert!(cache.get_or_fetch(&catalog, &missing).await.is_err());
        assert_eq!(catalog.detail_calls_for("mock://catalog/99/"), 2);
        assert!(!cache.contains("mock://catalog/99/"));
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let catalog = MockCatalog::with_names(&["a", "b"]);
        let cache = DetailCache::new();
        let clone = cache.clone();

        cache
            .get_or_fetch(&catalog, &catalog.summary(1).unwrap())
            .await
            .unwrap();

        assert!(clone.get(&MockCatalog::detail_ref(1)).await.is_some());
        assert_eq!(clone.entry_count().await, 1);
    }

    #[tokio::test]
    async fn test_resolve_all_keeps_listing_order() {
        let catalog = MockCatalog::with_names(&["a", "b", "c", "d"]);
        let cache = DetailCache::new();
        let summaries: Vec<_> = (0..4).rev().filter_map(|i| catalog.summary(i)).collect();

        let details = cache.resolve_all(&catalog, &summaries, 2).await.unwrap();
        let names: Vec<_> = details.iter().map(|d| d.name.as_str()).collect();

        assert_eq!(names, vec!["d", "c", "b", "a"]);
        assert_eq!(catalog.detail_calls(), 4);
    }

    #[tokio::test]
    async fn test_resolve_all_fails_on_any_error() {
        let catalog = MockCatalog::with_names(&["a"]);
        let cache = DetailCache::new();
        let summaries = vec![
            catalog.summary(0).unwrap(),
            ItemSummary::new("ghost", "mock://catalog/42/"),
        ];

        let result = cache.resolve_all(&catalog, &summaries, 2).await;
        assert!(matches!(result, Err(GalleryError::Transport(_))));
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = DetailCache::default();
        let catalog = MockCatalog::with_names(&["a"]);
        cache
            .get_or_fetch(&catalog, &catalog.summary(0).unwrap())
            .await
            .unwrap();

        cache.clear();
        assert_eq!(cache.entry_count().await, 0);
    }
}
