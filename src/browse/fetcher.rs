//! Browse-mode page fetching
//!
//! One listing call per page, then detail lookups for every summary on it
//! through the shared detail cache.

use crate::api::CatalogApi;
use crate::cache::DetailCache;
use crate::error::GalleryError;
use crate::pagination::{self, PageResult};
use std::sync::Arc;

/// Fetches pages of the unfiltered catalog
pub struct PageFetcher<C: ?Sized> {
    api: Arc<C>,
    details: DetailCache,
}

impl<C: CatalogApi + ?Sized> PageFetcher<C> {
    /// Create a fetcher over `api` that resolves details through `details`
    #[must_use]
    pub fn new(api: Arc<C>, details: DetailCache) -> Self {
        Self { api, details }
    }

    /// Detail cache used by this fetcher
    #[must_use]
    pub const fn details(&self) -> &DetailCache {
        &self.details
    }

    /// Fetch page `page_index` (1-based) of `page_size` items
    ///
    /// The total count in the result is the catalog's reported count, and
    /// `total_pages` is not capped; apply `PageResult::with_max_pages` for that.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::Transport` if the listing or any detail fetch
    /// fails, and `GalleryError::EmptyResult` if the page has no items.
    pub async fn fetch_page(&self, page_size: usize, page_index: usize) -> Result<PageResult, GalleryError> {
        let offset = pagination::offset(page_index, page_size);
        let listing = self.api.list(page_size, offset).await?;

        if listing.items.is_empty() {
            return Err(GalleryError::EmptyResult {
                page: page_index,
                total_count: listing.count,
            });
        }

        let items = self
            .details
            .resolve_all(self.api.as_ref(), &listing.items, page_size)
            .await?;

        tracing::debug!(
            page = page_index,
            page_size,
            offset,
            total = listing.count,
            "fetched browse page"
        );

        Ok(PageResult::new(items, listing.count, page_index, page_size))
    }

    /// Warm the detail cache for a page without producing a result
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn prefetch(&self, page_size: usize, page_index: usize) {
        match self.fetch_page(page_size, page_index).await {
            Ok(page) => tracing::debug!(page = page_index, items = page.items.len(), "prefetched page"),
            Err(e) if e.is_empty_result() => {}
            Err(e) => tracing::debug!(page = page_index, error = %e, "prefetch failed"),
        }
    }
}
