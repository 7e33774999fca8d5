//! Display ordering for the items on the current page

use crate::api::ItemDetail;
use crate::error::GalleryError;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// Sort applied to the visible page
///
/// Sorting never touches the fetched page; `apply` returns a reordered copy.
/// `None` keeps fetch order, and the sort is stable so ties keep it as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    None,
    HeightHigh,
    HeightLow,
    WeightHigh,
    WeightLow,
    OrderHigh,
    OrderLow,
}

impl SortOrder {
    /// Every sort order, in menu order
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::HeightHigh,
        Self::HeightLow,
        Self::WeightHigh,
        Self::WeightLow,
        Self::OrderHigh,
        Self::OrderLow,
    ];

    /// Address-bar form of the sort order
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::HeightHigh => "height-high",
            Self::HeightLow => "height-low",
            Self::WeightHigh => "weight-high",
            Self::WeightLow => "weight-low",
            Self::OrderHigh => "order-high",
            Self::OrderLow => "order-low",
        }
    }

    /// Reordered copy of `items`
    #[must_use]
    pub fn apply(self, items: &[ItemDetail]) -> Vec<ItemDetail> {
        let mut sorted = items.to_vec();
        match self {
            Self::None => {}
            Self::HeightHigh => sorted.sort_by_key(|d| Reverse(d.height)),
            Self::HeightLow => sorted.sort_by_key(|d| d.height),
            Self::WeightHigh => sorted.sort_by_key(|d| Reverse(d.weight)),
            Self::WeightLow => sorted.sort_by_key(|d| d.weight),
            Self::OrderHigh => sorted.sort_by_key(|d| Reverse(d.order)),
            Self::OrderLow => sorted.sort_by_key(|d| d.order),
        }
        sorted
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GalleryError::Config(format!("Unknown sort order: {s}")))
    }
}
