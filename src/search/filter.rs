//! Name filtering for search mode
//!
//! Any record that exposes a display name can be filtered with the same
//! logic through the [`AsNamed`] trait:
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  AsNamed Trait                      │  ← Adaptation layer
//! │  - name() -> &str                   │
//! └─────────────────────────────────────┘
//!            ▲
//!            │ implements
//!    ┌───────┴────────┐
//!    │                │
//! ItemSummary     ItemDetail
//!
//! ┌─────────────────────────────────────┐
//! │  NameFilterExt<T: AsNamed>          │  ← Filtering logic
//! │  - matching(&NameQuery)             │
//! └─────────────────────────────────────┘
//! ```
//!
//! Matching is a case-insensitive substring test. There is no ranking:
//! matches come back in the order of the input slice.

use crate::api::{ItemDetail, ItemSummary};

/// Normalized search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    needle: String,
}

impl NameQuery {
    /// Normalize raw input: trim surrounding whitespace and lowercase
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    /// Normalized query text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Whether the query matches everything
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Whether `name` contains the query, ignoring case
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.needle.is_empty() || name.to_lowercase().contains(&self.needle)
    }
}

/// Types that can be filtered by name
pub trait AsNamed {
    /// Display name used for matching
    fn name(&self) -> &str;
}

impl AsNamed for ItemSummary {
    fn name(&self) -> &str {
        &self.name
    }
}

impl AsNamed for ItemDetail {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Extension trait for filtering slices of named records
pub trait NameFilterExt<T: AsNamed> {
    /// Items whose name matches `query`, in their original order
    fn matching<'a>(&'a self, query: &'a NameQuery) -> impl Iterator<Item = &'a T> + 'a
    where
        T: 'a;
}

impl<T: AsNamed> NameFilterExt<T> for [T] {
    fn matching<'a>(&'a self, query: &'a NameQuery) -> impl Iterator<Item = &'a T> + 'a
    where
        T: 'a,
    {
        self.iter().filter(move |item| query.matches(item.name()))
    }
}
