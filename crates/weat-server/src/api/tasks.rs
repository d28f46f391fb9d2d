use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use weat_core::{validate_date_range, TaskRun, TaskStatusCount};

use super::{map_source_error, normalize_limit, ApiError, AppState, DataEnvelope};

#[derive(Debug, Deserialize)]
pub(super) struct StatusWindowParams {
    start_date: Option<String>,
    end_date: Option<String>,
}

// Unlike the public listing, this surface is strict: both dates are
// required ISO 8601 and violations are 400s naming the offending field.
pub(super) async fn task_status(
    State(state): State<AppState>,
    Query(params): Query<StatusWindowParams>,
) -> Result<Json<DataEnvelope<Vec<TaskStatusCount>>>, ApiError> {
    let window = validate_date_range(params.start_date.as_deref(), params.end_date.as_deref())
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let counts = state
        .source
        .task_status_counts(window)
        .await
        .map_err(|e| map_source_error(&e))?;

    Ok(Json(DataEnvelope { data: counts }))
}

#[derive(Debug, Deserialize)]
pub(super) struct RunsParams {
    limit: Option<i64>,
}

pub(super) async fn list_task_runs(
    State(state): State<AppState>,
    Query(params): Query<RunsParams>,
) -> Result<Json<DataEnvelope<Vec<TaskRun>>>, ApiError> {
    let limit = normalize_limit(params.limit);

    let runs = state
        .source
        .recent_task_runs(limit)
        .await
        .map_err(|e| map_source_error(&e))?;

    Ok(Json(DataEnvelope { data: runs }))
}
