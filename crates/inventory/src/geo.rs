//! Geolocation value formatting.
//!
//! A venue's location is stored as free text: usually a map link, sometimes
//! raw `lat,lng` coordinates typed by hand.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const MAP_BASE_URL: &str = "https://maps.google.com/maps";

static COORDINATE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d+\.?\d*,-?\d+\.?\d*$").expect("coordinate pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Map link for a position.
pub fn map_link(coords: Coordinates) -> String {
    format!(
        "{MAP_BASE_URL}?q={},{}",
        coords.latitude, coords.longitude
    )
}

/// Normalize a manually typed location.
///
/// A bare `lat,lng` pair becomes a map link; anything else (a pasted URL,
/// a description) is kept as typed.
pub fn normalize_manual_entry(raw: &str) -> String {
    let trimmed = raw.trim();
    if COORDINATE_PAIR.is_match(trimmed) {
        format!("{MAP_BASE_URL}?q={trimmed}")
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_link_embeds_coordinates() {
        let link = map_link(Coordinates {
            latitude: 3.4516,
            longitude: -76.532,
        });
        assert_eq!(link, "https://maps.google.com/maps?q=3.4516,-76.532");
    }

    #[test]
    fn typed_coordinates_become_a_link() {
        assert_eq!(
            normalize_manual_entry("3.4516,-76.5320"),
            "https://maps.google.com/maps?q=3.4516,-76.5320"
        );
        assert_eq!(
            normalize_manual_entry(" -3,76 "),
            "https://maps.google.com/maps?q=-3,76"
        );
    }

    #[test]
    fn other_text_is_kept_verbatim() {
        let url = "https://maps.app.goo.gl/abc123";
        assert_eq!(normalize_manual_entry(url), url);
        assert_eq!(normalize_manual_entry("3.45, -76.53"), "3.45, -76.53");
        assert_eq!(normalize_manual_entry(""), "");
    }
}
