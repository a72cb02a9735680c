use crate::error::Result;
use crate::models::{Branch, ContentRecord, Event, Inspiration, Sermon};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Clone, Debug)]
pub struct DashboardService {
    pool: SqlitePool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub sermon_count: i64,
    pub event_count: i64,
    pub branch_count: i64,
    pub inspiration_count: i64,
}

impl DashboardService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Row counts for the admin dashboard.
    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats> {
        Ok(DashboardStats {
            sermon_count: self.count_rows::<Sermon>().await?,
            event_count: self.count_rows::<Event>().await?,
            branch_count: self.count_rows::<Branch>().await?,
            inspiration_count: self.count_rows::<Inspiration>().await?,
        })
    }

    async fn count_rows<R: ContentRecord>(&self) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", R::TABLE);
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
