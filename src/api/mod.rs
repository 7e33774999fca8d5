//! Creature catalog access
//!
//! The gallery talks to its catalog only through the [`CatalogApi`] trait:
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  CatalogApi Trait                   │  ← Adaptation layer
//! │  - list(limit, offset) -> Listing   │
//! │  - detail(detail_ref) -> ItemDetail │
//! └─────────────────────────────────────┘
//!            ▲
//!            │ implements
//!    ┌───────┴────────┐
//!    │                │
//! HttpCatalog     MockCatalog
//! ```
//!
//! `HttpCatalog` speaks the PokeAPI-style REST shape; `MockCatalog` is an
//! in-memory stand-in with call counters and injectable latency.

pub mod error;
pub mod http;
pub mod mock;
pub mod types;

pub use error::ApiError;
pub use http::HttpCatalog;
pub use mock::MockCatalog;
pub use types::{ItemDetail, ItemSummary, Listing};

use async_trait::async_trait;

/// Result alias for catalog calls
pub type Result<T> = std::result::Result<T, ApiError>;

/// Access to a paginated creature catalog
///
/// Implementations must be cheap to share: the gallery keeps one instance
/// behind an `Arc` and calls it from concurrent detail fetches.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// List `limit` summaries starting at `offset`, plus the catalog's total count
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the listing cannot be fetched or decoded.
    async fn list(&self, limit: usize, offset: usize) -> Result<Listing>;

    /// Fetch the full detail record behind a summary's `detail_ref`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the detail cannot be fetched or decoded.
    async fn detail(&self, detail_ref: &str) -> Result<ItemDetail>;
}
