use crate::error::{AppError, Result};
use crate::models::{ContentFields, ContentRecord, ListOrder};
use crate::repositories::{ContentRepository, SqliteContentRepository};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

/// The CRUD contract shared by sermons, events, branches and daily
/// inspiration.
pub struct ContentService<R: ContentRecord> {
    repository: Arc<dyn ContentRepository<R>>,
}

impl<R: ContentRecord> ContentService<R> {
    pub fn new(repository: Arc<dyn ContentRepository<R>>) -> Self {
        Self { repository }
    }

    pub fn sqlite(pool: SqlitePool) -> Self {
        Self::new(Arc::new(SqliteContentRepository::<R>::new(pool)))
    }

    /// All rows in the entity's default order.
    pub async fn list(&self) -> Result<Vec<R>> {
        self.repository.list(R::DEFAULT_ORDER).await
    }

    pub async fn list_ordered(&self, order: ListOrder) -> Result<Vec<R>> {
        self.repository.list(order).await
    }

    pub async fn get(&self, id: i64) -> Result<R> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(AppError::NotFound(R::LABEL))
    }

    pub async fn create(&self, fields: R::Fields) -> Result<i64> {
        fields.validate()?;
        let id = self.repository.create(&fields).await?;
        info!("Created {} {}", R::TABLE, id);
        Ok(id)
    }

    /// Full replace of every mutable column.
    pub async fn update(&self, id: i64, fields: R::Fields) -> Result<()> {
        fields.validate()?;
        if !self.repository.update(id, &fields).await? {
            return Err(AppError::NotFound(R::LABEL));
        }
        info!("Updated {} {}", R::TABLE, id);
        Ok(())
    }

    /// Deleting a row that is already gone is not an error.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if self.repository.delete(id).await? {
            info!("Deleted {} {}", R::TABLE, id);
        }
        Ok(())
    }
}
