//! Full-listing cache used by local search

use crate::api::{CatalogApi, ItemSummary};
use crate::error::GalleryError;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Lazily loaded, load-once copy of the catalog listing
///
/// The first caller fetches up to `cap` summaries; concurrent callers wait
/// on that same load. A failed load leaves the cache empty, so the next
/// caller tries again.
pub struct ListingCache {
    cell: OnceCell<Arc<[ItemSummary]>>,
    cap: usize,
}

impl ListingCache {
    /// Create an empty cache that will load at most `cap` summaries
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            cell: OnceCell::new(),
            cap,
        }
    }

    /// Maximum number of summaries loaded
    #[must_use]
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Whether the listing has been loaded
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Return the cached listing, loading it on first use
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::Transport` if the listing fetch fails.
    pub async fn get_or_load<C>(&self, api: &C) -> Result<Arc<[ItemSummary]>, GalleryError>
    where
        C: CatalogApi + ?Sized,
    {
        let listing = self
            .cell
            .get_or_try_init(|| async {
                let listing = api.list(self.cap, 0).await?;
                tracing::info!(
                    loaded = listing.items.len(),
                    reported = listing.count,
                    cap = self.cap,
                    "loaded full listing for search"
                );
                Ok::<_, GalleryError>(Arc::from(listing.items))
            })
            .await?;

        Ok(Arc::clone(listing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockCatalog;
    use std::time::Duration;

    #[tokio::test]
    async fn test_loads_once() {
        let catalog = MockCatalog::with_names(&["a", "b", "c"]);
        let cache = ListingCache::new(1000);
        assert!(!cache.is_loaded());

        let first = cache.get_or_load(&catalog).await.unwrap();
        let second = cache.get_or_load(&catalog).await.unwrap();

        assert_eq!(first.len(), 3);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(catalog.list_requests(), vec![(1000, 0)]);
        assert!(cache.is_loaded());
    }

    #[tokio::test]
    async fn test_cap_limits_listing() {
        let catalog = MockCatalog::with_names(&["a", "b", "c", "d"]);
        let cache = ListingCache::new(2);

        let listing = cache.get_or_load(&catalog).await.unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(cache.cap(), 2);
    }

    #[tokio::test]
    async fn test_failure_allows_retry() {
        let catalog = MockCatalog::with_names(&["a"]);
        catalog.fail_next_lists(1);
        let cache = ListingCache::new(1000);

        assert!(matches!(
            cache.get_or_load(&catalog).await,
            Err(GalleryError::Transport(_))
        ));
        assert!(!cache.is_loaded());

        assert_eq!(cache.get_or_load(&catalog).await.unwrap().len(), 1);
        assert_eq!(catalog.list_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_first_use_shares_load() {
        let catalog = MockCatalog::with_names(&["a", "b"])
            .with_list_delays([Duration::from_millis(300)]);
        let cache = ListingCache::new(1000);

        let (a, b) = tokio::join!(cache.get_or_load(&catalog), cache.get_or_load(&catalog));

        assert_eq!(a.unwrap().len(), 2);
        assert_eq!(b.unwrap().len(), 2);
        assert_eq!(catalog.list_calls(), 1);
    }
}
