//! Gallery error taxonomy
//!
//! # Error Types
//!
//! - **`Transport`**: A catalog call failed; the user can retry by triggering
//!   any state change
//! - **`EmptyResult`**: The requested page has no items; rendered as a
//!   "no results" state rather than a failure
//! - **`Config`**: An invalid page size or max-pages value; the previous
//!   value is kept
//! - **`Settings`**: The settings file could not be read or written
//!
//! `Transport` wraps the `ApiError` in an `Arc` because a detail fetch that
//! several callers coalesced onto reports one shared error to all of them.

use crate::api::ApiError;
use std::sync::Arc;
use thiserror::Error;

/// Gallery errors
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Catalog request failed
    #[error("Transport error: {0}")]
    Transport(#[from] Arc<ApiError>),

    /// Page has no items
    #[error("No items on page {page} ({total_count} total)")]
    EmptyResult { page: usize, total_count: usize },

    /// Invalid gallery setting
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings file error
    #[error("Settings error: {0}")]
    Settings(#[from] ::config::ConfigError),
}

impl From<ApiError> for GalleryError {
    fn from(err: ApiError) -> Self {
        Self::Transport(Arc::new(err))
    }
}

impl GalleryError {
    /// Whether the error should be rendered as "no items" instead of a failure
    #[must_use]
    pub const fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult { .. })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
