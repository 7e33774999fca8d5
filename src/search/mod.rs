//! Search mode - name filtering over the full listing
//!
//! The first search loads up to `listing_cap` summaries in one request and
//! keeps them for the session. Every later query filters that copy locally,
//! so typing only costs detail fetches for the page being shown.

pub mod filter;
pub mod index;

pub use filter::{AsNamed, NameFilterExt, NameQuery};
pub use index::SearchIndex;
