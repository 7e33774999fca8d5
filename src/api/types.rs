//! Catalog data models
//!
//! Domain records (`ItemSummary`, `ItemDetail`, `Listing`) are what the rest
//! of the crate works with. The `*Response` types mirror the catalog's JSON
//! and are converted at the API boundary.

use serde::{Deserialize, Serialize};

// ============================================================================
// Domain Types
// ============================================================================

/// Listing-level record for one catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    /// Trailing path segment of the detail reference (`"25"` for `.../pokemon/25/`)
    pub id: String,

    /// Display name as reported by the listing
    pub name: String,

    /// Where the full detail record is fetched from
    pub detail_ref: String,
}

impl ItemSummary {
    /// Create a summary, deriving `id` from the detail reference
    #[must_use]
    pub fn new(name: impl Into<String>, detail_ref: impl Into<String>) -> Self {
        let detail_ref = detail_ref.into();
        Self {
            id: id_from_ref(&detail_ref).to_string(),
            name: name.into(),
            detail_ref,
        }
    }
}

/// Full detail record for one catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub order: i64,
    pub image_url: String,
}

/// One window of the catalog listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Total number of entries the catalog reports, independent of the window
    pub count: usize,

    /// Summaries in the catalog's native order
    pub items: Vec<ItemSummary>,
}

/// Last non-empty path segment of a resource URL
///
/// `https://pokeapi.co/api/v2/pokemon/25/` yields `"25"`.
#[must_use]
pub fn id_from_ref(detail_ref: &str) -> &str {
    detail_ref
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

// ============================================================================
// Wire Types
// ============================================================================

/// `GET {base}?limit=&offset=` response body
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    pub count: usize,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// `{ name, url }` pair used by listing results
#[derive(Debug, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// `GET {detail_ref}` response body, only the fields the gallery reads
#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub order: i64,
    #[serde(default)]
    pub sprites: Option<Sprites>,
}

/// Nested sprite block of a detail response
#[derive(Debug, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl From<ListingResponse> for Listing {
    fn from(response: ListingResponse) -> Self {
        Self {
            count: response.count,
            items: response
                .results
                .into_iter()
                .map(|r| ItemSummary::new(r.name, r.url))
                .collect(),
        }
    }
}

impl DetailResponse {
    /// Convert into an `ItemDetail`, substituting `placeholder` for a missing sprite
    #[must_use]
    pub fn into_detail(self, placeholder: &str) -> ItemDetail {
        let image_url = self
            .sprites
            .and_then(|s| s.front_default)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| placeholder.to_string());

        ItemDetail {
            name: self.name,
            height: self.height,
            weight: self.weight,
            order: self.order,
            image_url,
        }
    }
}
