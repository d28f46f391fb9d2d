//! Permissive normalization of listing query parameters.
//!
//! The public listing surface favors availability over strictness: any
//! malformed parameter degrades to a safe default instead of failing the
//! request. The admin surface takes the opposite stance; see
//! [`crate::datetime`]. The two normalizers are deliberately separate.

use std::collections::BTreeMap;

use crate::restaurant::Coordinate;

/// Page size used when the request does not carry a usable `limit`.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Fields the listing endpoint can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Distance,
    Rating,
    ReviewCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A parsed `sort_by` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parse a `"<field>:<direction>"` value against the fixed allow-list.
    ///
    /// Anything outside the six accepted literals is dropped, never an
    /// error, so malformed or legacy client requests degrade gracefully.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (key, direction) = match raw {
            "distance:asc" => (SortKey::Distance, SortDirection::Asc),
            "distance:desc" => (SortKey::Distance, SortDirection::Desc),
            "rating:asc" => (SortKey::Rating, SortDirection::Asc),
            "rating:desc" => (SortKey::Rating, SortDirection::Desc),
            "review_count:asc" => (SortKey::ReviewCount, SortDirection::Asc),
            "review_count:desc" => (SortKey::ReviewCount, SortDirection::Desc),
            _ => return None,
        };
        Some(Self { key, direction })
    }
}

/// A listing request after normalization.
///
/// Construction is total: no combination of raw parameters fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub page: u32,
    pub page_size: u32,
    pub location: Option<Coordinate>,
    pub max_distance: Option<f64>,
    pub sort: Option<SortSpec>,
    pub search: Option<String>,
}

impl ListingQuery {
    /// Normalize raw query parameters into a usable query.
    ///
    /// - `page`: integer ≥ 1, else 1.
    /// - `limit`: integer ≥ 1, else `default_page_size`.
    /// - `lat`/`lng`: finite floats, and only taken as a pair; a lone
    ///   coordinate leaves the location absent.
    /// - `distance`: finite non-negative float, else absent.
    /// - `sort_by`: see [`SortSpec::parse`].
    /// - `q`: trimmed, empty collapses to absent.
    #[must_use]
    pub fn from_params(params: &BTreeMap<String, String>, default_page_size: u32) -> Self {
        let page = parse_min_one(params.get("page")).unwrap_or(1);
        let page_size = parse_min_one(params.get("limit")).unwrap_or(default_page_size);

        let lat = parse_finite(params.get("lat"));
        let lng = parse_finite(params.get("lng"));
        let location = match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Coordinate { lat, lng }),
            _ => None,
        };

        let max_distance = parse_finite(params.get("distance")).filter(|d| *d >= 0.0);
        let sort = params.get("sort_by").and_then(|raw| SortSpec::parse(raw));
        let search = params
            .get("q")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned);

        Self {
            page,
            page_size,
            location,
            max_distance,
            sort,
            search,
        }
    }

    /// Row offset for the data-source page fetch.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1).saturating_mul(i64::from(self.page_size))
    }

    /// Row limit for the data-source page fetch.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

fn parse_min_one(raw: Option<&String>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n >= 1)
}

fn parse_finite(raw: Option<&String>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_empty() {
        let query = ListingQuery::from_params(&params(&[]), DEFAULT_PAGE_SIZE);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 20);
        assert!(query.location.is_none());
        assert!(query.max_distance.is_none());
        assert!(query.sort.is_none());
        assert!(query.search.is_none());
    }

    #[test]
    fn non_numeric_page_and_limit_fall_back() {
        let query = ListingQuery::from_params(
            &params(&[("page", "abc"), ("limit", "lots")]),
            DEFAULT_PAGE_SIZE,
        );
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 20);
    }

    #[test]
    fn zero_and_negative_page_fall_back_to_one() {
        for raw in ["0", "-3"] {
            let query = ListingQuery::from_params(&params(&[("page", raw)]), DEFAULT_PAGE_SIZE);
            assert_eq!(query.page, 1, "page={raw}");
        }
    }

    #[test]
    fn valid_page_and_limit_pass_through() {
        let query =
            ListingQuery::from_params(&params(&[("page", "3"), ("limit", "5")]), DEFAULT_PAGE_SIZE);
        assert_eq!(query.page, 3);
        assert_eq!(query.page_size, 5);
        assert_eq!(query.offset(), 10);
        assert_eq!(query.limit(), 5);
    }

    #[test]
    fn offset_saturates_at_extreme_page_and_limit() {
        let query = ListingQuery::from_params(
            &params(&[("page", "4294967295"), ("limit", "4294967295")]),
            DEFAULT_PAGE_SIZE,
        );
        assert_eq!(query.page, u32::MAX);
        assert_eq!(query.page_size, u32::MAX);
        assert_eq!(query.offset(), i64::MAX);
    }

    #[test]
    fn configured_default_page_size_is_used() {
        let query = ListingQuery::from_params(&params(&[]), 50);
        assert_eq!(query.page_size, 50);
    }

    #[test]
    fn lone_lat_leaves_location_absent() {
        let query = ListingQuery::from_params(&params(&[("lat", "25.03")]), DEFAULT_PAGE_SIZE);
        assert!(query.location.is_none());
    }

    #[test]
    fn lat_lng_pair_becomes_location() {
        let query = ListingQuery::from_params(
            &params(&[("lat", "25.034"), ("lng", "121.5645")]),
            DEFAULT_PAGE_SIZE,
        );
        let location = query.location.expect("location should be present");
        assert!((location.lat - 25.034).abs() < 1e-9);
        assert!((location.lng - 121.5645).abs() < 1e-9);
    }

    #[test]
    fn non_finite_coordinates_are_dropped() {
        let query = ListingQuery::from_params(
            &params(&[("lat", "NaN"), ("lng", "121.5")]),
            DEFAULT_PAGE_SIZE,
        );
        assert!(query.location.is_none());
    }

    #[test]
    fn negative_distance_is_dropped() {
        let query = ListingQuery::from_params(&params(&[("distance", "-2")]), DEFAULT_PAGE_SIZE);
        assert!(query.max_distance.is_none());
    }

    #[test]
    fn distance_parses_as_float() {
        let query = ListingQuery::from_params(&params(&[("distance", "7.5")]), DEFAULT_PAGE_SIZE);
        assert_eq!(query.max_distance, Some(7.5));
    }

    #[test]
    fn sort_allow_list_accepts_all_six() {
        for (raw, key, direction) in [
            ("distance:asc", SortKey::Distance, SortDirection::Asc),
            ("distance:desc", SortKey::Distance, SortDirection::Desc),
            ("rating:asc", SortKey::Rating, SortDirection::Asc),
            ("rating:desc", SortKey::Rating, SortDirection::Desc),
            ("review_count:asc", SortKey::ReviewCount, SortDirection::Asc),
            (
                "review_count:desc",
                SortKey::ReviewCount,
                SortDirection::Desc,
            ),
        ] {
            assert_eq!(SortSpec::parse(raw), Some(SortSpec { key, direction }));
        }
    }

    #[test]
    fn sort_rejects_everything_else() {
        for raw in [
            "rating",
            "rating:ASC",
            "rating:descending",
            "price:asc",
            "distance",
            "",
            "rating:desc ",
        ] {
            assert_eq!(SortSpec::parse(raw), None, "sort_by={raw:?}");
        }
    }

    #[test]
    fn unrecognized_sort_is_dropped_not_error() {
        let query =
            ListingQuery::from_params(&params(&[("sort_by", "price:asc")]), DEFAULT_PAGE_SIZE);
        assert!(query.sort.is_none());
    }

    #[test]
    fn search_is_trimmed_and_empty_collapses() {
        let query = ListingQuery::from_params(&params(&[("q", "  noodles ")]), DEFAULT_PAGE_SIZE);
        assert_eq!(query.search.as_deref(), Some("noodles"));

        let query = ListingQuery::from_params(&params(&[("q", "   ")]), DEFAULT_PAGE_SIZE);
        assert!(query.search.is_none());
    }
}
