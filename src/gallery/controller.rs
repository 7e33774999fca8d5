//! Gallery controller and builder
//!
//! ```no_run
//! use dex_gallery::config::GallerySettings;
//! use dex_gallery::gallery::GalleryController;
//! use dex_gallery::api::HttpCatalog;
//! use std::sync::Arc;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = GallerySettings::load()?;
//! let api = Arc::new(HttpCatalog::from_settings(&settings)?);
//!
//! let gallery = GalleryController::builder()
//!     .api(api)
//!     .settings(settings)
//!     .build()?;
//!
//! let outcome = gallery.start().await;
//! # Ok(())
//! # }
//! ```
//!
//! Every state change goes through one path: mutate the session under the
//! lock, take the next generation token, release the lock, await the fetch,
//! then re-take the lock and apply the result only if the token is still
//! current.
//!
//! In infinite-scroll mode [`GalleryController::load_more`] appends the next
//! page to the items already shown instead of replacing them. Any other
//! dispatch starts the accumulation over from the page it loads.

use super::debounce::Debouncer;
use super::sort::SortOrder;
use super::state::{GalleryView, LoadState, Mode, Outcome, SessionState};
use super::view_state::ViewState;
use crate::api::{CatalogApi, ItemDetail};
use crate::browse::PageFetcher;
use crate::cache::DetailCache;
use crate::config::GallerySettings;
use crate::error::GalleryError;
use crate::pagination::{self, PageResult};
use crate::search::SearchIndex;
use reqwest::Url;
use std::sync::{Arc, Mutex, MutexGuard};

/// Mutable controller state, guarded by one lock
#[derive(Debug)]
struct ControllerState {
    session: SessionState,
    sort: SortOrder,
    generation: u64,
    load: LoadState,
    last: Option<PageResult>,
    infinite_scroll: bool,
    /// Items shown in infinite-scroll mode, oldest page first
    accumulated: Vec<ItemDetail>,
}

impl ControllerState {
    /// Start a dispatch that replaces the shown items
    fn begin(&mut self) -> Request {
        self.begin_with(false)
    }

    /// Start a dispatch for the current session
    fn begin_with(&mut self, append: bool) -> Request {
        self.generation += 1;
        self.load = LoadState::Loading {
            generation: self.generation,
        };
        Request {
            generation: self.generation,
            mode: self.session.mode(),
            page: self.session.current_page,
            page_size: self.session.page_size,
            max_pages: self.session.max_pages,
            query: self.session.query.trim().to_string(),
            append,
        }
    }

    /// Capped page count under the current session, if a page was loaded
    fn total_pages(&self) -> Option<usize> {
        self.last.as_ref().map(|p| {
            pagination::capped_total_pages(p.total_count, self.session.page_size, self.session.max_pages)
        })
    }

    fn view(&self) -> GalleryView {
        let view = GalleryView::new(self.session.clone(), self.sort, self.load.clone(), self.last.as_ref());
        if self.infinite_scroll {
            view.with_accumulated(&self.accumulated)
        } else {
            view
        }
    }
}

/// Snapshot of what one dispatch loads
#[derive(Debug, Clone)]
struct Request {
    generation: u64,
    mode: Mode,
    page: usize,
    page_size: usize,
    max_pages: usize,
    query: String,
    /// Append to the shown items instead of replacing them
    append: bool,
}

impl Request {
    /// Last reachable page if this request landed past it
    ///
    /// Appending loads never jump back; they only follow `has_next`.
    fn past_end(&self, result: &Result<PageResult, GalleryError>) -> Option<usize> {
        if self.append {
            return None;
        }
        let total_count = match result {
            Ok(page) => page.total_count,
            Err(GalleryError::EmptyResult { total_count, .. }) => *total_count,
            Err(_) => return None,
        };
        let last = pagination::capped_total_pages(total_count, self.page_size, self.max_pages);
        (last > 0 && self.page > last).then_some(last)
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Prev,
    Next,
    To(usize),
}

/// Stateful gallery session
///
/// Owns the session, sort order and both caches. Methods take `&self` and
/// may run concurrently; only the newest dispatch is ever applied. Use
/// `GalleryController::builder()` to construct.
pub struct GalleryController<C: ?Sized> {
    fetcher: PageFetcher<C>,
    search: SearchIndex<C>,
    state: Mutex<ControllerState>,
    debouncer: Debouncer,
}

impl<C: CatalogApi + ?Sized> GalleryController<C> {
    /// Create a new builder for constructing a `GalleryController`
    #[must_use]
    pub fn builder() -> GalleryControllerBuilder<C> {
        GalleryControllerBuilder::new()
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current render snapshot
    ///
    /// `session.current_page` is the requested page until a load completes.
    /// A page read from the address bar is only clamped to the real page
    /// count once the first load tells the controller how many pages exist.
    #[must_use]
    pub fn view(&self) -> GalleryView {
        self.lock().view()
    }

    #[must_use]
    pub fn session(&self) -> SessionState {
        self.lock().session.clone()
    }

    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.lock().sort
    }

    #[must_use]
    pub fn infinite_scroll(&self) -> bool {
        self.lock().infinite_scroll
    }

    /// Generation of the most recent dispatch
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Detail cache shared by browse and search
    #[must_use]
    pub const fn details(&self) -> &DetailCache {
        self.fetcher.details()
    }

    /// Address-bar form of the current state
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        let state = self.lock();
        ViewState::from_session(&state.session, state.sort)
    }

    /// Write the current state into `url`, keeping unrelated parameters
    pub fn sync_url(&self, url: &mut Url) {
        self.view_state().write_to(url);
    }

    /// Load the initial page
    pub async fn start(&self) -> Outcome {
        self.dispatch(|_| {}).await
    }

    /// Re-run the current request, e.g. after a failure
    pub async fn refresh(&self) -> Outcome {
        self.dispatch(|_| {}).await
    }

    pub async fn next_page(&self) -> Outcome {
        self.navigate(Step::Next).await
    }

    pub async fn prev_page(&self) -> Outcome {
        self.navigate(Step::Prev).await
    }

    /// Jump to `page`, clamped to the known page range
    ///
    /// Jumping to the page already shown loads it again.
    pub async fn go_to_page(&self, page: usize) -> Outcome {
        self.navigate(Step::To(page)).await
    }

    /// Change the page size and reload from page 1
    pub async fn set_page_size(&self, page_size: usize) -> Outcome {
        if page_size == 0 {
            return Self::reject("page size must be greater than zero");
        }
        self.dispatch(|session| {
            session.page_size = page_size;
            session.current_page = 1;
        })
        .await
    }

    /// Change the page cap
    ///
    /// Page counts are re-derived from the last fetched total without a
    /// network call. Only when the current page falls outside the new range
    /// is the clamped page fetched.
    pub async fn set_max_pages(&self, max_pages: usize) -> Outcome {
        if max_pages == 0 {
            return Self::reject("max pages must be greater than zero");
        }

        let request = {
            let mut state = self.lock();
            state.session.max_pages = max_pages;

            match state.total_pages() {
                Some(total) if total > 0 && state.session.current_page > total => {
                    tracing::debug!(from = state.session.current_page, to = total, max_pages, "clamping page to new cap");
                    state.session.current_page = total;
                    state.begin()
                }
                _ => return Outcome::Applied(state.view()),
            }
        };

        self.run(request).await
    }

    /// Set the search query immediately and reload from page 1
    ///
    /// Pending debounced keystrokes are dropped.
    pub async fn set_query(&self, query: &str) -> Outcome {
        self.debouncer.cancel();
        self.apply_query(query).await
    }

    /// Set the search query after the debounce quiet period
    ///
    /// Returns `Outcome::Debounced` if another keystroke arrives first.
    pub async fn type_query(&self, query: &str) -> Outcome {
        if !self.debouncer.settle().await {
            return Outcome::Debounced;
        }
        self.apply_query(query).await
    }

    /// Change the display order of the current page
    pub fn set_sort(&self, sort: SortOrder) -> Outcome {
        let mut state = self.lock();
        state.sort = sort;
        Outcome::Applied(state.view())
    }

    /// Switch infinite scroll on or off and reload from page 1
    pub async fn set_infinite_scroll(&self, enabled: bool) -> Outcome {
        let request = {
            let mut state = self.lock();
            state.infinite_scroll = enabled;
            state.accumulated.clear();
            state.session.current_page = 1;
            state.begin()
        };
        self.run(request).await
    }

    /// Append the next page to the shown items
    ///
    /// Only acts in infinite-scroll mode. Returns `Outcome::Unchanged` when
    /// infinite scroll is off, a load is already running, or there is no
    /// next page.
    pub async fn load_more(&self) -> Outcome {
        let request = {
            let mut state = self.lock();
            let has_next = state
                .total_pages()
                .is_some_and(|total| state.session.current_page < total);

            if !state.infinite_scroll || state.load.is_loading() || !has_next {
                return Outcome::Unchanged(state.view());
            }

            state.session.current_page += 1;
            state.begin_with(true)
        };

        self.run(request).await
    }

    /// Warm the detail cache for the page after the current browse page
    ///
    /// Returns `false` when there is no next page to warm.
    pub async fn prefetch_next(&self) -> bool {
        let target = {
            let state = self.lock();
            let has_next = state
                .total_pages()
                .is_some_and(|total| state.session.current_page < total);
            (state.session.mode() == Mode::Browse && has_next)
                .then(|| (state.session.page_size, state.session.current_page + 1))
        };

        match target {
            Some((page_size, page)) => {
                self.fetcher.prefetch(page_size, page).await;
                true
            }
            None => false,
        }
    }

    async fn apply_query(&self, query: &str) -> Outcome {
        let query = query.trim().to_string();
        self.dispatch(move |session| {
            session.query = query;
            session.current_page = 1;
        })
        .await
    }

    async fn navigate(&self, step: Step) -> Outcome {
        let request = {
            let mut state = self.lock();
            let current = state.session.current_page;
            let target = match step {
                Step::Prev => current.saturating_sub(1),
                Step::Next => current.saturating_add(1),
                Step::To(page) => page,
            };
            let target = match state.total_pages() {
                Some(total) => pagination::clamp_page(target, total),
                None => target.max(1),
            };

            if target == current && !matches!(step, Step::To(_)) {
                return Outcome::Unchanged(state.view());
            }

            state.session.current_page = target;
            state.begin()
        };

        self.run(request).await
    }

    async fn dispatch(&self, mutate: impl FnOnce(&mut SessionState)) -> Outcome {
        let request = {
            let mut state = self.lock();
            mutate(&mut state.session);
            state.begin()
        };
        self.run(request).await
    }

    async fn run(&self, mut request: Request) -> Outcome {
        tracing::debug!(
            generation = request.generation,
            mode = ?request.mode,
            append = request.append,
            page = request.page,
            page_size = request.page_size,
            "dispatching page load"
        );

        let mut result = self.load(&request).await;

        if let Some(last) = request.past_end(&result) {
            {
                let mut state = self.lock();
                if state.generation != request.generation {
                    return Self::superseded(&request, state.generation);
                }
                state.session.current_page = last;
            }
            tracing::info!(requested = request.page, last, "page past the end, loading last page");
            request.page = last;
            result = self.load(&request).await;
        }

        self.apply(&request, result)
    }

    async fn load(&self, request: &Request) -> Result<PageResult, GalleryError> {
        match request.mode {
            Mode::Browse => self.fetcher.fetch_page(request.page_size, request.page).await,
            Mode::Search => {
                self.search
                    .search(&request.query, request.page_size, request.page)
                    .await
            }
        }
    }

    fn apply(&self, request: &Request, result: Result<PageResult, GalleryError>) -> Outcome {
        let mut state = self.lock();
        if state.generation != request.generation {
            return Self::superseded(request, state.generation);
        }

        match result {
            Ok(page) => {
                if request.append {
                    state.accumulated.extend(page.items.iter().cloned());
                } else {
                    state.accumulated.clone_from(&page.items);
                }
                state.session.current_page = page.current_page;
                state.last = Some(page);
                state.load = LoadState::Loaded;
            }
            Err(GalleryError::EmptyResult { page, total_count }) => {
                tracing::debug!(page, total_count, "page has no items");
                if !request.append {
                    state.accumulated.clear();
                }
                state.session.current_page = page;
                state.last = Some(PageResult::empty(total_count, page, request.page_size));
                state.load = LoadState::Loaded;
            }
            Err(e) => {
                tracing::warn!(generation = request.generation, page = request.page, error = %e, "page load failed");
                if request.append {
                    // keep what is already on screen; the next load_more retries this page
                    state.session.current_page = request.page - 1;
                } else {
                    state.last = None;
                    state.accumulated.clear();
                }
                state.load = LoadState::Failed { message: e.to_string() };
            }
        }

        Outcome::Applied(state.view())
    }

    fn superseded(request: &Request, current: u64) -> Outcome {
        tracing::debug!(generation = request.generation, current, "discarding superseded result");
        Outcome::Superseded {
            generation: request.generation,
        }
    }

    fn reject(message: &str) -> Outcome {
        tracing::warn!(message, "rejected setting");
        Outcome::Rejected(GalleryError::Config(message.to_string()))
    }
}

/// Builder for `GalleryController`
pub struct GalleryControllerBuilder<C: ?Sized> {
    api: Option<Arc<C>>,
    settings: GallerySettings,
    view_state: Option<ViewState>,
    details: Option<DetailCache>,
    infinite_scroll: bool,
}

impl<C: CatalogApi + ?Sized> GalleryControllerBuilder<C> {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            api: None,
            settings: GallerySettings::default(),
            view_state: None,
            details: None,
            infinite_scroll: false,
        }
    }

    /// Set the catalog (required)
    #[must_use]
    pub fn api(mut self, api: Arc<C>) -> Self {
        self.api = Some(api);
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: GallerySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Start from an address-bar state instead of the settings' defaults
    #[must_use]
    pub fn view_state(mut self, view_state: ViewState) -> Self {
        self.view_state = Some(view_state);
        self
    }

    /// Start from the parameters in `url`
    #[must_use]
    pub fn url(self, url: &Url) -> Self {
        let view_state = ViewState::from_url(url, &self.settings);
        self.view_state(view_state)
    }

    /// Use an existing detail cache, e.g. one shared with another controller
    #[must_use]
    pub fn details(mut self, details: DetailCache) -> Self {
        self.details = Some(details);
        self
    }

    /// Start in infinite-scroll mode
    #[must_use]
    pub fn infinite_scroll(mut self, enabled: bool) -> Self {
        self.infinite_scroll = enabled;
        self
    }

    /// Build the `GalleryController`
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::Config` if no catalog was provided or the
    /// settings fail validation.
    pub fn build(self) -> Result<GalleryController<C>, GalleryError> {
        let api = self
            .api
            .ok_or_else(|| GalleryError::Config("a catalog is required".to_string()))?;
        self.settings.validate()?;

        let view_state = self
            .view_state
            .unwrap_or_else(|| ViewState::defaults(&self.settings));
        let details = self.details.unwrap_or_default();

        Ok(GalleryController {
            fetcher: PageFetcher::new(Arc::clone(&api), details.clone()),
            search: SearchIndex::new(api, details, self.settings.listing_cap),
            state: Mutex::new(ControllerState {
                session: view_state.session(),
                sort: view_state.sort,
                generation: 0,
                load: LoadState::Idle,
                last: None,
                infinite_scroll: self.infinite_scroll,
                accumulated: Vec::new(),
            }),
            debouncer: Debouncer::new(self.settings.debounce()),
        })
    }
}

impl<C: CatalogApi + ?Sized> Default for GalleryControllerBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
