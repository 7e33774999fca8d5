//! Testing utilities for dex-gallery
//!
//! Fixture catalogs and detail records shared by the unit tests.
//!
//! Only available when compiled with `cfg(test)`.

use crate::api::{ItemDetail, MockCatalog};
use crate::config::GallerySettings;
use std::sync::Arc;

/// First thirty entries of the reference catalog, in listing order
pub const NAMES: [&str; 30] = [
    "bulbasaur", "ivysaur", "venusaur", "charmander", "charmeleon",
    "charizard", "squirtle", "wartortle", "blastoise", "caterpie",
    "metapod", "butterfree", "weedle", "kakuna", "beedrill",
    "pidgey", "pidgeotto", "pidgeot", "rattata", "raticate",
    "spearow", "fearow", "ekans", "arbok", "pikachu",
    "raichu", "sandshrew", "sandslash", "nidoran-f", "nidorina",
];

/// Detail record with zeroed stats
#[must_use]
pub fn detail(name: &str) -> ItemDetail {
    detail_with(name, 0, 0, 0)
}

/// Detail record with the given stats
#[must_use]
pub fn detail_with(name: &str, height: u32, weight: u32, order: i64) -> ItemDetail {
    ItemDetail {
        name: name.to_string(),
        height,
        weight,
        order,
        image_url: format!("https://img.test/{name}.png"),
    }
}

/// Mock catalog serving the first `n` fixture names
///
/// # Panics
/// Panics if `n` exceeds the fixture size.
#[must_use]
pub fn catalog(n: usize) -> Arc<MockCatalog> {
    Arc::new(MockCatalog::with_names(&NAMES[..n]))
}

/// Default settings with a shorter debounce for readable timings
#[must_use]
pub fn settings() -> GallerySettings {
    GallerySettings {
        debounce_ms: 250,
        ..GallerySettings::default()
    }
}
