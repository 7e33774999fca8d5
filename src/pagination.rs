//! Page arithmetic and page results
//!
//! Pages are 1-based. A page of size `n` at index `p` covers items
//! `[(p - 1) * n, p * n)`. Totals come from the catalog's reported count in
//! browse mode and from the filtered match count in search mode.

use crate::api::ItemDetail;
use std::ops::Range;

/// Page-count choices offered for the max-pages setting
pub const MAX_PAGES_CHOICES: [usize; 7] = [5, 10, 15, 25, 50, 100, 120];

/// Item offset of the first entry on `page`
#[must_use]
pub const fn offset(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1).saturating_mul(page_size)
}

/// Number of pages needed for `total_count` items
#[must_use]
pub const fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total_count.div_ceil(page_size)
    }
}

/// Number of pages offered once the max-pages cap applies
#[must_use]
pub fn capped_total_pages(total_count: usize, page_size: usize, max_pages: usize) -> usize {
    total_pages(total_count, page_size).min(max_pages)
}

/// Clamp `page` into `[1, total_pages]`, or to 1 when there are no pages
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Index range of `page` within a collection of `len` items
///
/// Pages past the end yield an empty range at `len`.
#[must_use]
pub fn page_range(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = offset(page, page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Max-pages choices that make sense for a catalog of `catalog_size` items
#[must_use]
pub fn max_pages_choices(page_size: usize, catalog_size: usize) -> Vec<usize> {
    let reachable = total_pages(catalog_size, page_size);
    MAX_PAGES_CHOICES
        .iter()
        .copied()
        .filter(|&n| n <= reachable)
        .collect()
}

/// One page of detailed items plus pagination metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// Items in fetch order
    pub items: Vec<ItemDetail>,
    pub total_count: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageResult {
    /// Build a result for `current_page`; `total_pages` is not capped
    #[must_use]
    pub fn new(items: Vec<ItemDetail>, total_count: usize, current_page: usize, page_size: usize) -> Self {
        Self::with_pages(items, total_count, current_page, page_size, total_pages(total_count, page_size))
    }

    /// Build an item-less result, e.g. for a page past the end
    #[must_use]
    pub fn empty(total_count: usize, current_page: usize, page_size: usize) -> Self {
        Self::new(Vec::new(), total_count, current_page, page_size)
    }

    /// Derive a result whose page count is capped at `max_pages`
    #[must_use]
    pub fn with_max_pages(&self, max_pages: usize) -> Self {
        Self::with_pages(
            self.items.clone(),
            self.total_count,
            self.current_page,
            self.page_size,
            capped_total_pages(self.total_count, self.page_size, max_pages),
        )
    }

    fn with_pages(
        items: Vec<ItemDetail>,
        total_count: usize,
        current_page: usize,
        page_size: usize,
        total_pages: usize,
    ) -> Self {
        Self {
            items,
            total_count,
            current_page,
            page_size,
            total_pages,
            has_prev: current_page > 1,
            has_next: current_page < total_pages,
        }
    }

    /// Whether the page holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `current_page` lies past the last page
    #[must_use]
    pub const fn is_past_end(&self) -> bool {
        self.total_pages > 0 && self.current_page > self.total_pages
    }
}

/// One entry of a pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    /// A clickable page number
    Page(usize),
    /// Elided run of pages
    Gap,
}

/// Page numbers to show around `current`
///
/// Always shows the first and last page and up to five pages in between,
/// keeping the window a constant width near either end:
///
/// ```text
/// current = 1,  total = 20:  1 2 3 4 5 6 … 20
/// current = 10, total = 20:  1 … 8 9 10 11 12 … 20
/// current = 19, total = 20:  1 … 15 16 17 18 19 20
/// ```
#[must_use]
pub fn page_window(current: usize, total: usize) -> Vec<PageSlot> {
    if total == 0 {
        return Vec::new();
    }
    if total == 1 {
        return vec![PageSlot::Page(1)];
    }

    let last_inner = total - 1;
    let (start, end) = if current <= 3 {
        (2, last_inner.min(6))
    } else if current + 2 >= total {
        (total.saturating_sub(5).max(2), last_inner)
    } else {
        (current - 2, (current + 2).min(last_inner))
    };

    let mut slots = vec![PageSlot::Page(1)];
    if start > 2 {
        slots.push(PageSlot::Gap);
    }
    slots.extend((start..=end).map(PageSlot::Page));
    if end < last_inner {
        slots.push(PageSlot::Gap);
    }
    slots.push(PageSlot::Page(total));
    slots
}
