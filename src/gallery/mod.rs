//! Gallery session control
//!
//! [`GalleryController`] is the single entry point for UI events. It routes
//! each event to browse or search mode, tags the dispatch with a generation
//! token and hands back an [`Outcome`]:
//!
//! ```text
//! event ──► mutate SessionState ──► generation += 1 ──► fetch
//!                                                         │
//!            Outcome::Superseded ◄── token stale? ◄───────┘
//!            Outcome::Applied(GalleryView) ◄── token current
//! ```
//!
//! Sorting and page-cap changes are derived from the last fetched page and
//! never reach the network, except when the cap pushes the current page out
//! of range.

pub mod controller;
pub mod debounce;
pub mod sort;
pub mod state;
pub mod view_state;

pub use controller::{GalleryController, GalleryControllerBuilder};
pub use debounce::Debouncer;
pub use sort::SortOrder;
pub use state::{GalleryView, LoadState, Mode, Outcome, SessionState};
pub use view_state::ViewState;
