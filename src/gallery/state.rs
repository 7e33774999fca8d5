//! Session state and render snapshots

use super::sort::SortOrder;
use crate::api::ItemDetail;
use crate::error::GalleryError;
use crate::pagination::{self, PageResult, PageSlot};

/// Which fetcher serves the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Pagination over the unfiltered catalog
    Browse,
    /// Pagination over name matches in the cached full listing
    Search,
}

/// User-controlled paging state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// 1-based page index
    pub current_page: usize,
    pub page_size: usize,
    pub max_pages: usize,
    /// Trimmed search query; empty in browse mode
    pub query: String,
}

impl SessionState {
    #[must_use]
    pub const fn new(page_size: usize, max_pages: usize) -> Self {
        Self {
            current_page: 1,
            page_size,
            max_pages,
            query: String::new(),
        }
    }

    /// Browse when the query is empty, search otherwise
    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.query.trim().is_empty() {
            Mode::Browse
        } else {
            Mode::Search
        }
    }
}

/// Progress of the most recent dispatch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading {
        generation: u64,
    },
    Loaded,
    Failed {
        message: String,
    },
}

impl LoadState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub session: SessionState,
    pub sort: SortOrder,
    pub load: LoadState,
    /// Last applied page, with the max-pages cap applied
    pub page: Option<PageResult>,
    /// Page items in display order
    pub items: Vec<ItemDetail>,
    /// Pagination bar entries
    pub slots: Vec<PageSlot>,
    /// Whether `items` accumulates pages instead of showing one
    pub infinite_scroll: bool,
}

impl GalleryView {
    /// Derive a snapshot from controller state
    #[must_use]
    pub fn new(session: SessionState, sort: SortOrder, load: LoadState, last: Option<&PageResult>) -> Self {
        let page = last.map(|p| p.with_max_pages(session.max_pages));
        let items = page.as_ref().map(|p| sort.apply(&p.items)).unwrap_or_default();
        let slots = page
            .as_ref()
            .map(|p| pagination::page_window(p.current_page, p.total_pages))
            .unwrap_or_default();

        Self {
            session,
            sort,
            load,
            page,
            items,
            slots,
            infinite_scroll: false,
        }
    }

    /// Show `accumulated` instead of the last page's items
    ///
    /// Used in infinite-scroll mode, where every page loaded since the last
    /// reset stays on screen. The sort order applies to the whole list.
    #[must_use]
    pub fn with_accumulated(mut self, accumulated: &[ItemDetail]) -> Self {
        self.items = self.sort.apply(accumulated);
        self.infinite_scroll = true;
        self
    }

    /// Capped page count, or 0 before the first load
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.page.as_ref().map_or(0, |p| p.total_pages)
    }

    /// Whether the last load produced no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of a controller call
#[derive(Debug)]
pub enum Outcome {
    /// State changed; render this view
    Applied(GalleryView),
    /// A newer dispatch started before this one finished; its result was dropped
    Superseded { generation: u64 },
    /// A newer keystroke arrived within the quiet period
    Debounced,
    /// Nothing to do, e.g. "next" on the last page
    Unchanged(GalleryView),
    /// Invalid input; the previous setting was kept
    Rejected(GalleryError),
}

impl Outcome {
    /// The view carried by `Applied` or `Unchanged`
    #[must_use]
    pub const fn view(&self) -> Option<&GalleryView> {
        match self {
            Self::Applied(view) | Self::Unchanged(view) => Some(view),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    #[must_use]
    pub fn into_view(self) -> Option<GalleryView> {
        match self {
            Self::Applied(view) | Self::Unchanged(view) => Some(view),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::detail_with;

    #[test]
    fn test_mode_from_query() {
        let mut session = SessionState::new(5, 120);
        assert_eq!(session.mode(), Mode::Browse);

        session.query = "char".to_string();
        assert_eq!(session.mode(), Mode::Search);

        session.query = "   ".to_string();
        assert_eq!(session.mode(), Mode::Browse);
    }

    #[test]
    fn test_view_applies_cap_and_sort() {
        let items = vec![detail_with("a", 1, 10, 1), detail_with("b", 9, 20, 2)];
        let page = PageResult::new(items.clone(), 1302, 2, 2);
        let session = SessionState {
            current_page: 2,
            page_size: 2,
            max_pages: 10,
            query: String::new(),
        };

        let view = GalleryView::new(session, SortOrder::HeightHigh, LoadState::Loaded, Some(&page));

        assert_eq!(view.total_pages(), 10);
        assert_eq!(view.items[0].name, "b");
        // fetch order is kept on the page itself
        assert_eq!(view.page.as_ref().unwrap().items, items);
        assert_eq!(view.slots.first(), Some(&PageSlot::Page(1)));
        assert_eq!(view.slots.last(), Some(&PageSlot::Page(10)));
    }

    #[test]
    fn test_accumulated_view_sorts_whole_list() {
        let page = PageResult::new(vec![detail_with("c", 3, 0, 3)], 3, 2, 1);
        let accumulated = vec![
            detail_with("a", 1, 0, 1),
            detail_with("b", 9, 0, 2),
            detail_with("c", 3, 0, 3),
        ];

        let view = GalleryView::new(SessionState::new(1, 120), SortOrder::HeightHigh, LoadState::Loaded, Some(&page))
            .with_accumulated(&accumulated);

        assert!(view.infinite_scroll);
        let names: Vec<_> = view.items.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_view_before_first_load() {
        let view = GalleryView::new(SessionState::new(5, 120), SortOrder::None, LoadState::Idle, None);
        assert!(view.is_empty());
        assert_eq!(view.total_pages(), 0);
        assert!(view.slots.is_empty());
    }

    #[test]
    fn test_outcome_view_access() {
        let view = GalleryView::new(SessionState::new(5, 120), SortOrder::None, LoadState::Loaded, None);
        assert!(Outcome::Applied(view.clone()).is_applied());
        assert!(Outcome::Unchanged(view).view().is_some());
        assert!(Outcome::Debounced.view().is_none());
        assert!(Outcome::Superseded { generation: 3 }.into_view().is_none());
    }
}
