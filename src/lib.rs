//! Dex Gallery - paginated, searchable browsing of a remote creature catalog
//!
//! This library drives a gallery front end: it pages through a REST catalog,
//! filters it by name, caches detail records for the session and keeps the
//! address bar in sync. Rendering is left to the caller, which consumes
//! [`GalleryView`] snapshots.
//!
//! ```text
//! GalleryController ──┬── PageFetcher ──┐
//!                     └── SearchIndex ──┼── DetailCache ──► CatalogApi
//!                           └── ListingCache ─────────────► CatalogApi
//! ```

pub mod api;
pub mod browse;
pub mod cache;
pub mod config;
pub mod error;
pub mod gallery;
pub mod logging;
pub mod pagination;
pub mod search;

#[cfg(test)]
pub mod testing;

pub use api::{CatalogApi, HttpCatalog, ItemDetail, ItemSummary, MockCatalog};
pub use config::GallerySettings;
pub use error::GalleryError;
pub use gallery::{GalleryController, GalleryView, LoadState, Mode, Outcome, SessionState, SortOrder, ViewState};
pub use pagination::{PageResult, PageSlot};
