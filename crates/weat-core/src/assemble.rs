//! Distance attachment, filtering, ordering, and pagination metadata for
//! listing responses.

use std::cmp::Ordering;

use serde::Serialize;

use crate::geo::{self, DistanceUnit};
use crate::query::{ListingQuery, SortDirection, SortKey};
use crate::restaurant::Restaurant;

/// The paginated listing response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ListingPage {
    pub data: Vec<Restaurant>,
    pub count: i64,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

/// `max(1, ceil(count / page_size))`. An empty result set still has one page.
#[must_use]
pub fn total_pages(count: i64, page_size: u32) -> i64 {
    let page_size = i64::from(page_size.max(1));
    let count = count.max(0);
    (count / page_size + i64::from(count % page_size != 0)).max(1)
}

/// Assemble the in-memory stage of a listing response.
///
/// The order of operations is part of the contract: distances are
/// attached first, the distance filter runs over the attached values,
/// the sort runs over the filtered set, and the envelope math uses the
/// data source's total match count rather than the page length.
///
/// A `distance` sort without a request location is skipped outright, and
/// the distance filter only applies when the request carried a location.
/// Records lacking their own coordinates never get a `distance` value;
/// under a distance filter they are excluded, and under a distance or
/// rating sort they collect after every record that has the sort key.
#[must_use]
pub fn assemble(
    mut records: Vec<Restaurant>,
    query: &ListingQuery,
    total_count: i64,
    unit: DistanceUnit,
) -> ListingPage {
    if let Some(origin) = query.location {
        for record in &mut records {
            record.distance = record
                .location
                .map(|location| geo::distance_in(origin, location, unit));
        }
        if let Some(max_distance) = query.max_distance {
            records.retain(|r| r.distance.is_some_and(|d| d <= max_distance));
        }
    }

    if let Some(sort) = query.sort {
        if sort.key != SortKey::Distance || query.location.is_some() {
            // Vec::sort_by is stable: ties and missing-key runs keep
            // their source order.
            records.sort_by(|a, b| compare(a, b, sort.key, sort.direction));
        }
    }

    ListingPage {
        data: records,
        count: total_count,
        page: query.page,
        page_size: query.page_size,
        total_pages: total_pages(total_count, query.page_size),
    }
}

// Review counts stay far below 2^53, so the cast is exact.
#[allow(clippy::cast_precision_loss)]
fn sort_value(record: &Restaurant, key: SortKey) -> Option<f64> {
    match key {
        SortKey::Distance => record.distance,
        SortKey::Rating => record.summary.as_ref().map(|s| s.average_rating),
        SortKey::ReviewCount => record.summary.as_ref().map(|s| s.review_count as f64),
    }
}

fn compare(a: &Restaurant, b: &Restaurant, key: SortKey, direction: SortDirection) -> Ordering {
    match (sort_value(a, key), sort_value(b, key)) {
        (Some(x), Some(y)) => {
            let ordering = x.total_cmp(&y);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
        // Records without the sort key go last in either direction.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
