//! Background task-queue types surfaced by the admin monitoring API.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One run of a queued background task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRun {
    pub id: String,
    pub task_type: String,
    pub status: String,
    pub attempts: i32,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Number of task runs in one status over a date window.
#[derive(Debug, Clone, Serialize)]
pub struct TaskStatusCount {
    pub status: String,
    pub count: i64,
}
