//! Address-bar mirror of the session
//!
//! Query parameters: `page`, `perPage`, `maxPages`, `sort`, `search`.
//! Reading is lenient: a missing, zero or unparsable value falls back to its
//! default. Writing replaces these five parameters in place and leaves every
//! other parameter alone.

use super::sort::SortOrder;
use super::state::SessionState;
use crate::config::GallerySettings;
use reqwest::Url;

const PAGE: &str = "page";
const PER_PAGE: &str = "perPage";
const SORT: &str = "sort";
const SEARCH: &str = "search";
const MAX_PAGES: &str = "maxPages";

/// Session settings as carried in the address bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub page: usize,
    pub per_page: usize,
    pub max_pages: usize,
    pub sort: SortOrder,
    pub search: String,
}

impl ViewState {
    /// View state with nothing in the address bar
    #[must_use]
    pub fn defaults(settings: &GallerySettings) -> Self {
        Self {
            page: 1,
            per_page: settings.page_size,
            max_pages: settings.max_pages,
            sort: SortOrder::None,
            search: String::new(),
        }
    }

    /// Read the view state from `url`'s query string
    #[must_use]
    pub fn from_url(url: &Url, settings: &GallerySettings) -> Self {
        let mut state = Self::defaults(settings);

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                PAGE => state.page = positive(&value).unwrap_or(1),
                PER_PAGE => state.per_page = positive(&value).unwrap_or(settings.page_size),
                MAX_PAGES => state.max_pages = positive(&value).unwrap_or(settings.max_pages),
                SORT => state.sort = value.parse().unwrap_or_default(),
                SEARCH => state.search = value.trim().to_string(),
                _ => {}
            }
        }

        state
    }

    /// Snapshot of a running session
    #[must_use]
    pub fn from_session(session: &SessionState, sort: SortOrder) -> Self {
        Self {
            page: session.current_page,
            per_page: session.page_size,
            max_pages: session.max_pages,
            sort,
            search: session.query.clone(),
        }
    }

    /// Session to start from; the search text is trimmed
    #[must_use]
    pub fn session(&self) -> SessionState {
        SessionState {
            current_page: self.page,
            page_size: self.per_page,
            max_pages: self.max_pages,
            query: self.search.trim().to_string(),
        }
    }

    fn pairs(&self) -> [(&'static str, String); 5] {
        [
            (PAGE, self.page.to_string()),
            (PER_PAGE, self.per_page.to_string()),
            (SORT, self.sort.to_string()),
            (SEARCH, self.search.clone()),
            (MAX_PAGES, self.max_pages.to_string()),
        ]
    }

    /// Write the view state into `url`'s query string
    ///
    /// Existing parameters keep their position; duplicates of ours are
    /// dropped and missing ones are appended.
    pub fn write_to(&self, url: &mut Url) {
        let ours = self.pairs();
        let mut written = [false; 5];
        let mut pairs: Vec<(String, String)> = Vec::new();

        for (key, value) in url.query_pairs() {
            match ours.iter().position(|(name, _)| *name == key) {
                Some(i) if !written[i] => {
                    written[i] = true;
                    pairs.push((key.into_owned(), ours[i].1.clone()));
                }
                Some(_) => {}
                None => pairs.push((key.into_owned(), value.into_owned())),
            }
        }

        for (i, (name, value)) in ours.iter().enumerate() {
            if !written[i] {
                pairs.push(((*name).to_string(), value.clone()));
            }
        }

        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

fn positive(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|&n| n > 0)
}
