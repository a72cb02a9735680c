use crate::error::{AppError, Result};
use crate::models::{ContentFields, ContentRecord, FieldValue, ListOrder};
use async_trait::async_trait;
use sqlx::{
    query::Query,
    sqlite::{Sqlite, SqliteArguments},
    SqlitePool,
};
use std::marker::PhantomData;

/// CRUD over one content table. `update` and `delete` report whether a row
/// was touched; callers decide whether that is an error.
#[async_trait]
pub trait ContentRepository<R: ContentRecord>: Send + Sync {
    async fn list(&self, order: ListOrder) -> Result<Vec<R>>;
    async fn get_by_id(&self, id: i64) -> Result<Option<R>>;
    async fn create(&self, fields: &R::Fields) -> Result<i64>;
    async fn update(&self, id: i64, fields: &R::Fields) -> Result<bool>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub struct SqliteContentRepository<R> {
    pool: SqlitePool,
    _record: PhantomData<fn() -> R>,
}

impl<R: ContentRecord> SqliteContentRepository<R> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }

    fn select_columns() -> String {
        let mut columns = vec!["id"];
        columns.extend_from_slice(<R::Fields as ContentFields>::COLUMNS);
        columns.join(", ")
    }
}

fn bind_values<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    values: Vec<FieldValue>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in values {
        query = match value {
            FieldValue::Text(v) => query.bind(v),
            FieldValue::OptionalText(v) => query.bind(v),
            FieldValue::Flag(v) => query.bind(v),
        };
    }
    query
}

fn map_write_error<R: ContentRecord>(e: sqlx::Error) -> AppError {
    if e.to_string().contains("UNIQUE") {
        AppError::Validation(R::DUPLICATE_MESSAGE.to_string())
    } else {
        AppError::Database(e)
    }
}

#[async_trait]
impl<R: ContentRecord> ContentRepository<R> for SqliteContentRepository<R> {
    async fn list(&self, order: ListOrder) -> Result<Vec<R>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            Self::select_columns(),
            R::TABLE,
            order.to_sql()
        );

        let rows = sqlx::query_as::<_, R>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<R>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            Self::select_columns(),
            R::TABLE
        );

        let row = sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn create(&self, fields: &R::Fields) -> Result<i64> {
        let columns = <R::Fields as ContentFields>::COLUMNS;
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            columns.join(", "),
            placeholders
        );

        let result = bind_values(sqlx::query(&sql), fields.values())
            .execute(&self.pool)
            .await
            .map_err(map_write_error::<R>)?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, fields: &R::Fields) -> Result<bool> {
        let assignments = <R::Fields as ContentFields>::COLUMNS
            .iter()
            .map(|c| format!("{} = ?", c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {} WHERE id = ?", R::TABLE, assignments);

        let result = bind_values(sqlx::query(&sql), fields.values())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_write_error::<R>)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }
}
