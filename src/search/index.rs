//! Local search over the cached full listing

use super::filter::{NameFilterExt, NameQuery};
use crate::api::{CatalogApi, ItemSummary};
use crate::cache::{DetailCache, ListingCache};
use crate::error::GalleryError;
use crate::pagination::{self, PageResult};
use std::sync::Arc;

/// Filters and paginates the full listing by name
///
/// The listing is fetched once on the first search and reused for the rest
/// of the session. Only the summaries on the requested page are resolved to
/// detail records.
pub struct SearchIndex<C: ?Sized> {
    api: Arc<C>,
    details: DetailCache,
    listing: ListingCache,
}

impl<C: CatalogApi + ?Sized> SearchIndex<C> {
    #[must_use]
    pub fn new(api: Arc<C>, details: DetailCache, listing_cap: usize) -> Self {
        Self {
            api,
            details,
            listing: ListingCache::new(listing_cap),
        }
    }

    /// Listing cache backing this index
    #[must_use]
    pub const fn listing(&self) -> &ListingCache {
        &self.listing
    }

    /// Every summary whose name matches `query`, in listing order
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::Transport` if the listing cannot be loaded.
    pub async fn matches(&self, query: &str) -> Result<Vec<ItemSummary>, GalleryError> {
        let listing = self.listing.get_or_load(self.api.as_ref()).await?;
        let query = NameQuery::new(query);
        Ok(listing.matching(&query).cloned().collect())
    }

    /// Page `page_index` (1-based) of the items matching `query`
    ///
    /// `total_count` is the number of matches. No matches yields an empty
    /// page, not an error.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::Transport` if the listing or a detail fetch fails.
    pub async fn search(&self, query: &str, page_size: usize, page_index: usize) -> Result<PageResult, GalleryError> {
        let matches = self.matches(query).await?;
        let range = pagination::page_range(matches.len(), page_index, page_size);

        let items = self
            .details
            .resolve_all(self.api.as_ref(), &matches[range], page_size)
            .await?;

        tracing::debug!(
            query = query.trim(),
            matches = matches.len(),
            page = page_index,
            page_size,
            "search page resolved"
        );

        Ok(PageResult::new(items, matches.len(), page_index, page_size))
    }
}
