use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;

use weat_core::{assemble, ListingPage, ListingQuery, Restaurant};

use super::{map_source_error, ApiError, AppState};
use crate::source::SourceError;

// Params arrive as a raw string map so malformed values degrade to
// defaults instead of being rejected by typed extraction.
pub(super) async fn list_restaurants(
    State(state): State<AppState>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<ListingPage>, ApiError> {
    let query = ListingQuery::from_params(&params, state.default_page_size);

    let page = state
        .source
        .restaurant_page(query.search.as_deref(), query.offset(), query.limit())
        .await
        .map_err(|e| map_source_error(&e))?;

    Ok(Json(assemble(
        page.records,
        &query,
        page.total_count,
        state.distance_unit,
    )))
}

pub(super) async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Restaurant>, ApiError> {
    match state.source.restaurant_by_id(&id).await {
        Ok(restaurant) => Ok(Json(restaurant)),
        Err(SourceError::NotFound) => Err(ApiError::not_found("restaurant not found")),
        Err(error) => Err(map_source_error(&error)),
    }
}
