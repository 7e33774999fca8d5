//! Browse mode - pagination over the unfiltered catalog
//!
//! Each page costs one listing request plus one detail request per item not
//! already in the detail cache.

pub mod fetcher;

pub use fetcher::PageFetcher;
