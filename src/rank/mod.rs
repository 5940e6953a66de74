//! Ranking and radius filtering for located items
//!
//! Reorders and filters an immutable snapshot of places against a live
//! reference point. Every call returns a new ordering; the snapshot itself
//! is never mutated.

use crate::constants::geo::{DEFAULT_REFERENCE_LAT, DEFAULT_REFERENCE_LNG};
use crate::coord::distance::{haversine_distance, is_within_radius};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An item in the displayable list, located at a fixed point
///
/// Created at load time from static source data; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatedItem {
    /// Display title
    pub title: String,
    /// Fixed location
    #[serde(flatten)]
    pub coords: Coordinates,
    /// Numeric rating
    pub rating: f64,
    /// Creation date
    pub created: NaiveDate,
    /// Opaque display payload, passed through untouched
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

/// How to order the displayable list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Ascending by distance from the reference point
    Distance,
    /// Descending by rating
    Rating,
    /// Most recent first
    Date,
}

impl std::fmt::Display for RankingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Distance => write!(f, "distance"),
            Self::Rating => write!(f, "rating"),
            Self::Date => write!(f, "date"),
        }
    }
}

impl std::str::FromStr for RankingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "distance" => Ok(Self::Distance),
            "rating" => Ok(Self::Rating),
            "date" => Ok(Self::Date),
            _ => Err(format!("Unknown ranking mode: {}", s)),
        }
    }
}

/// The fallback reference point when no live one is available
pub fn default_reference() -> Coordinates {
    Coordinates::new(DEFAULT_REFERENCE_LAT, DEFAULT_REFERENCE_LNG)
}

/// Return the items reordered by the given mode
///
/// Distance mode falls back to the default reference when none is given.
/// All modes use a stable sort, so ties keep their original order.
pub fn rank(
    items: &[LocatedItem],
    mode: RankingMode,
    reference: Option<Coordinates>,
) -> Vec<LocatedItem> {
    let mut ranked = items.to_vec();

    match mode {
        RankingMode::Distance => {
            let reference = reference.unwrap_or_else(default_reference);
            ranked.sort_by(|a, b| {
                let dist_a = haversine_distance(reference, a.coords);
                let dist_b = haversine_distance(reference, b.coords);
                dist_a.total_cmp(&dist_b)
            });
        }
        RankingMode::Rating => {
            ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        }
        RankingMode::Date => {
            ranked.sort_by(|a, b| b.created.cmp(&a.created));
        }
    }

    ranked
}

/// Keep only items within `radius_km` of the center
///
/// A radius that is zero, negative, or non-finite disables filtering and
/// returns all items. Filtering twice with the same arguments yields the
/// same subset as filtering once.
pub fn filter_by_radius(
    items: &[LocatedItem],
    center: Coordinates,
    radius_km: f64,
) -> Vec<LocatedItem> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| is_within_radius(item.coords, center, radius_km * 1000.0))
        .cloned()
        .collect()
}

/// Load located items from a JSON file
pub fn load_items(path: &Path) -> Result<Vec<LocatedItem>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read places file: {}", e)))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::Parse(format!("Invalid places file: {}", e)))
}

/// Single owner of the display list state
///
/// Holds the immutable item snapshot and the current reference point; view
/// calls never mutate the snapshot.
#[derive(Debug, Clone)]
pub struct MapContext {
    items: Vec<LocatedItem>,
    reference: Option<Coordinates>,
}

impl MapContext {
    /// Create a context over an item snapshot, with no live reference yet
    pub fn new(items: Vec<LocatedItem>) -> Self {
        Self {
            items,
            reference: None,
        }
    }

    /// The underlying item snapshot, in load order
    pub fn items(&self) -> &[LocatedItem] {
        &self.items
    }

    /// The current reference point, if one has been set
    pub fn reference(&self) -> Option<Coordinates> {
        self.reference
    }

    /// Set the live reference point (user location or a fresh geocode)
    pub fn set_reference(&mut self, coords: Coordinates) {
        self.reference = Some(coords);
    }

    /// The reference used for distance views: live point or the default
    pub fn effective_reference(&self) -> Coordinates {
        self.reference.unwrap_or_else(default_reference)
    }

    /// Produce a display view: optionally radius-filtered, then ordered
    ///
    /// `mode` None means no reordering (items stay in load order), which is
    /// also what an unrecognized mode string maps to at the API boundary.
    pub fn view(&self, mode: Option<RankingMode>, radius_km: Option<f64>) -> Vec<LocatedItem> {
        let filtered = match radius_km {
            Some(radius) => filter_by_radius(&self.items, self.effective_reference(), radius),
            None => self.items.clone(),
        };

        match mode {
            Some(mode) => rank(&filtered, mode, self.reference),
            None => filtered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, lat: f64, lng: f64, rating: f64, created: &str) -> LocatedItem {
        LocatedItem {
            title: title.to_string(),
            coords: Coordinates::new(lat, lng),
            rating,
            created: created.parse().unwrap(),
            details: serde_json::Value::Null,
        }
    }

    /// Items at roughly 5km, 1km, and 3km north of the reference
    fn test_items() -> (Coordinates, Vec<LocatedItem>) {
        let reference = Coordinates::new(51.5074, -0.1278);
        let items = vec![
            item("five-km", 51.5524, -0.1278, 3.0, "2024-01-10"),
            item("one-km", 51.5164, -0.1278, 4.5, "2024-03-01"),
            item("three-km", 51.5344, -0.1278, 4.5, "2023-12-25"),
        ];
        (reference, items)
    }

    #[test]
    fn test_rank_by_distance() {
        let (reference, items) = test_items();
        let ranked = rank(&items, RankingMode::Distance, Some(reference));

        let titles: Vec<&str> = ranked.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["one-km", "three-km", "five-km"]);
    }

    #[test]
    fn test_rank_by_distance_default_reference() {
        // No reference: falls back to the fixed default (London), which is
        // the same point the test items are measured from
        let (_, items) = test_items();
        let ranked = rank(&items, RankingMode::Distance, None);
        assert_eq!(ranked[0].title, "one-km");
    }

    #[test]
    fn test_rank_by_rating_ties_stable() {
        let (_, items) = test_items();
        let ranked = rank(&items, RankingMode::Rating, None);

        // one-km and three-km share 4.5; original order preserved
        let titles: Vec<&str> = ranked.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["one-km", "three-km", "five-km"]);
    }

    #[test]
    fn test_rank_by_date_most_recent_first() {
        let (_, items) = test_items();
        let ranked = rank(&items, RankingMode::Date, None);

        let titles: Vec<&str> = ranked.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["one-km", "five-km", "three-km"]);
    }

    #[test]
    fn test_rank_does_not_mutate_input() {
        let (reference, items) = test_items();
        let _ = rank(&items, RankingMode::Distance, Some(reference));
        assert_eq!(items[0].title, "five-km");
    }

    #[test]
    fn test_filter_by_radius() {
        let (reference, items) = test_items();
        let within = filter_by_radius(&items, reference, 2.0);

        assert_eq!(within.len(), 1);
        assert_eq!(within[0].title, "one-km");
    }

    #[test]
    fn test_filter_zero_radius_keeps_everything() {
        let (reference, items) = test_items();
        assert_eq!(filter_by_radius(&items, reference, 0.0).len(), 3);
        assert_eq!(filter_by_radius(&items, reference, -5.0).len(), 3);
        assert_eq!(filter_by_radius(&items, reference, f64::NAN).len(), 3);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let (reference, items) = test_items();
        let once = filter_by_radius(&items, reference, 4.0);
        let twice = filter_by_radius(&once, reference, 4.0);

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.title, b.title);
        }
    }

    #[test]
    fn test_ranking_mode_round_trip() {
        for mode in [RankingMode::Distance, RankingMode::Rating, RankingMode::Date] {
            let parsed: RankingMode = mode.to_string().parse().unwrap();
            assert_eq!(parsed, mode);
        }
        assert!("popularity".parse::<RankingMode>().is_err());
    }

    #[test]
    fn test_context_view() {
        let (reference, items) = test_items();
        let mut context = MapContext::new(items);

        // Without a mode the view keeps load order
        let view = context.view(None, None);
        assert_eq!(view[0].title, "five-km");

        context.set_reference(reference);
        let view = context.view(Some(RankingMode::Distance), Some(4.0));
        let titles: Vec<&str> = view.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["one-km", "three-km"]);
    }

    #[test]
    fn test_context_default_reference() {
        let (_, items) = test_items();
        let context = MapContext::new(items);
        assert_eq!(context.reference(), None);
        assert_eq!(context.effective_reference(), default_reference());
    }

    #[test]
    fn test_item_deserialization() {
        let json = r#"{
            "title": "Corner Cafe",
            "lat": 51.51,
            "lng": -0.12,
            "rating": 4.2,
            "created": "2024-06-01",
            "details": { "emoji": "☕" }
        }"#;

        let item: LocatedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.title, "Corner Cafe");
        assert_eq!(item.coords.lat, 51.51);
        assert_eq!(item.details["emoji"], "☕");
    }

    #[test]
    fn test_load_items_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.json");
        std::fs::write(
            &path,
            r#"[{"title": "A", "lat": 1.0, "lng": 2.0, "rating": 3.0, "created": "2024-01-01"}]"#,
        )
        .unwrap();

        let items = load_items(&path).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "A");

        assert!(load_items(&dir.path().join("missing.json")).is_err());
    }
}
