//! The data source behind the HTTP surface.
//!
//! Handlers talk to [`DataSource`] rather than to the pool directly, so
//! endpoint tests run against an in-memory source while production wires
//! in [`PgDataSource`].

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use weat_core::{DateRange, Restaurant, TaskRun, TaskStatusCount};
use weat_db::{DbError, RestaurantPageFilter, RestaurantRow, TaskRunRow, TaskStatusCountRow};

/// Failure reported by the data source.
///
/// The `Display` output of [`SourceError::Failed`] is surfaced to clients
/// verbatim in 500 responses.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Failed(String),
}

impl From<DbError> for SourceError {
    fn from(error: DbError) -> Self {
        match error {
            DbError::NotFound => Self::NotFound,
            other => Self::Failed(other.to_string()),
        }
    }
}

/// One fetched page of restaurants plus the total match count known to
/// the source, independent of the pagination window.
#[derive(Debug, Clone)]
pub struct RestaurantPage {
    pub records: Vec<Restaurant>,
    pub total_count: i64,
}

#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch one page of restaurants matching the search filter.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Failed`] when the fetch fails.
    async fn restaurant_page(
        &self,
        search: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<RestaurantPage, SourceError>;

    /// Fetch a single restaurant by its public id.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] for an unknown id and
    /// [`SourceError::Failed`] when the fetch fails.
    async fn restaurant_by_id(&self, id: &str) -> Result<Restaurant, SourceError>;

    /// Count task runs per status inside the window.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Failed`] when the aggregate fails.
    async fn task_status_counts(
        &self,
        window: DateRange,
    ) -> Result<Vec<TaskStatusCount>, SourceError>;

    /// Fetch the most recent task runs, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Failed`] when the fetch fails.
    async fn recent_task_runs(&self, limit: i64) -> Result<Vec<TaskRun>, SourceError>;

    /// Verify the source is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Failed`] when it is not.
    async fn ping(&self) -> Result<(), SourceError>;
}

/// Production [`DataSource`] backed by the Postgres pool.
#[derive(Clone)]
pub struct PgDataSource {
    pool: PgPool,
}

impl PgDataSource {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataSource for PgDataSource {
    async fn restaurant_page(
        &self,
        search: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<RestaurantPage, SourceError> {
        let filter = RestaurantPageFilter { search };
        let rows = weat_db::list_restaurants(&self.pool, filter, offset, limit).await?;
        let total_count = weat_db::count_restaurants(&self.pool, filter).await?;

        Ok(RestaurantPage {
            records: rows
                .into_iter()
                .map(RestaurantRow::into_restaurant)
                .collect(),
            total_count,
        })
    }

    async fn restaurant_by_id(&self, id: &str) -> Result<Restaurant, SourceError> {
        let row = weat_db::get_restaurant(&self.pool, id).await?;
        Ok(row.into_restaurant())
    }

    async fn task_status_counts(
        &self,
        window: DateRange,
    ) -> Result<Vec<TaskStatusCount>, SourceError> {
        let rows = weat_db::count_task_statuses(&self.pool, window.start, window.end).await?;
        Ok(rows
            .into_iter()
            .map(TaskStatusCountRow::into_status_count)
            .collect())
    }

    async fn recent_task_runs(&self, limit: i64) -> Result<Vec<TaskRun>, SourceError> {
        let rows = weat_db::list_task_runs(&self.pool, limit).await?;
        Ok(rows.into_iter().map(TaskRunRow::into_task_run).collect())
    }

    async fn ping(&self) -> Result<(), SourceError> {
        weat_db::health_check(&self.pool).await?;
        Ok(())
    }
}
