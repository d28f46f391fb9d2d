//! Database operations for the `task_runs` queue table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use weat_core::{TaskRun, TaskStatusCount};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `task_runs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRunRow {
    pub id: Uuid,
    pub task_type: String,
    pub status: String,
    /// The schema defines this as `INTEGER NOT NULL DEFAULT 0`.
    pub attempts: i32,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskRunRow {
    #[must_use]
    pub fn into_task_run(self) -> TaskRun {
        TaskRun {
            id: self.id.to_string(),
            task_type: self.task_type,
            status: self.status,
            attempts: self.attempts,
            error_message: self.error_message,
            created_at: self.created_at,
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }
}

/// A `(status, count)` aggregate row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskStatusCountRow {
    pub status: String,
    pub count: i64,
}

impl TaskStatusCountRow {
    #[must_use]
    pub fn into_status_count(self) -> TaskStatusCount {
        TaskStatusCount {
            status: self.status,
            count: self.count,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns the most recent `limit` task runs, ordered by `created_at DESC`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_task_runs(pool: &PgPool, limit: i64) -> Result<Vec<TaskRunRow>, DbError> {
    let rows = sqlx::query_as::<_, TaskRunRow>(
        "SELECT id, task_type, status, attempts, error_message, \
                created_at, started_at, completed_at \
         FROM task_runs \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Counts task runs per status inside a closed date window.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_task_statuses(
    pool: &PgPool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<TaskStatusCountRow>, DbError> {
    let rows = sqlx::query_as::<_, TaskStatusCountRow>(
        "SELECT status, COUNT(*) AS count \
         FROM task_runs \
         WHERE created_at >= $1 AND created_at <= $2 \
         GROUP BY status \
         ORDER BY status",
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
