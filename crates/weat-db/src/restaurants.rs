//! Read-model queries for the restaurant listing and detail endpoints.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use weat_core::relation;
use weat_core::{Coordinate, Restaurant};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A restaurant row with its to-one relations embedded as JSON.
///
/// `address` and `summary` come back from `json_agg` sub-selects, so a
/// present relation arrives as a one-element JSON array and a missing one
/// as SQL `NULL`. [`RestaurantRow::into_restaurant`] resolves that shape.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RestaurantRow {
    pub id: Uuid,
    pub name_zh: Option<String>,
    pub name_en: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub phone_number: Option<String>,
    pub google_maps_place_id: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub address: Option<Value>,
    pub summary: Option<Value>,
}

impl RestaurantRow {
    /// Convert the raw row into the API-facing record, collapsing the
    /// array-wrapped join shapes and pairing the coordinate columns.
    #[must_use]
    pub fn into_restaurant(self) -> Restaurant {
        let location = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinate { lat, lng }),
            _ => None,
        };

        Restaurant {
            id: self.id.to_string(),
            name_zh: self.name_zh,
            name_en: self.name_en,
            location,
            phone_number: self.phone_number,
            google_maps_place_id: self.google_maps_place_id,
            updated_at: self.updated_at,
            address: relation::to_one(self.address),
            summary: relation::to_one(self.summary),
            distance: None,
        }
    }
}

/// Input filters for the restaurant page fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestaurantPageFilter<'a> {
    pub search: Option<&'a str>,
}

const RESTAURANT_SELECT: &str = "SELECT \
         r.id, r.name_zh, r.name_en, r.lat, r.lng, \
         r.phone_number, r.google_maps_place_id, r.updated_at, \
         (SELECT json_agg(json_build_object( \
              'id', a.id::text, 'street', a.street, 'city', a.city, \
              'province', a.province, 'postal_code', a.postal_code)) \
            FROM restaurant_addresses a WHERE a.restaurant_id = r.id) AS address, \
         (SELECT json_agg(json_build_object( \
              'average_rating', s.average_rating, 'review_count', s.review_count, \
              'top_tags', s.top_tags)) \
            FROM restaurant_summaries s WHERE s.restaurant_id = r.id) AS summary \
     FROM restaurants r";

const SEARCH_CLAUSE: &str = "($1::TEXT IS NULL \
       OR r.name_zh ILIKE '%' || $1 || '%' \
       OR r.name_en ILIKE '%' || $1 || '%')";

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns one page of restaurants, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_restaurants(
    pool: &PgPool,
    filter: RestaurantPageFilter<'_>,
    offset: i64,
    limit: i64,
) -> Result<Vec<RestaurantRow>, DbError> {
    let sql = format!(
        "{RESTAURANT_SELECT} \
         WHERE {SEARCH_CLAUSE} \
         ORDER BY r.updated_at DESC, r.id DESC \
         OFFSET $2 LIMIT $3"
    );

    let rows = sqlx::query_as::<_, RestaurantRow>(&sql)
        .bind(filter.search)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Returns the total number of restaurants matching the filter,
/// independent of the pagination window.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_restaurants(
    pool: &PgPool,
    filter: RestaurantPageFilter<'_>,
) -> Result<i64, DbError> {
    let sql = format!("SELECT COUNT(*) FROM restaurants r WHERE {SEARCH_CLAUSE}");

    let count = sqlx::query_scalar::<_, i64>(&sql)
        .bind(filter.search)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Fetches a single restaurant by its public id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the id does not parse as a UUID or no
/// row exists, or [`DbError::Sqlx`] if the query fails.
pub async fn get_restaurant(pool: &PgPool, id: &str) -> Result<RestaurantRow, DbError> {
    let id = Uuid::parse_str(id).map_err(|_| DbError::NotFound)?;

    let sql = format!("{RESTAURANT_SELECT} WHERE r.id = $1");

    let row = sqlx::query_as::<_, RestaurantRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)?;

    Ok(row)
}
