//! In-memory caches shared by browse and search
//!
//! - [`DetailCache`]: detail records keyed by detail reference, fetched at
//!   most once per key even under concurrent demand
//! - [`ListingCache`]: the full catalog listing, loaded once for local search
//!
//! Both live as long as the gallery controller that owns them.

pub mod detail;
pub mod listing;

pub use detail::DetailCache;
pub use listing::ListingCache;
