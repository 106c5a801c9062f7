//! PostgreSQL collection backend
//!
//! Each record kind lives in its own table as a JSONB document next to the
//! store-assigned `id`, `seq` and `created_at` columns.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::collection::{duplicate_key, not_found, Collection};
use crate::models::{Document, Stored};
use crate::utils::clock::Clock;
use crate::utils::errors::{PortalError, Result};
use crate::utils::logging::log_database_operation;

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    body: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl DocumentRow {
    fn into_stored<T: Document>(self) -> Result<Stored<T>> {
        Ok(Stored {
            id: self.id,
            doc: serde_json::from_value(self.body)?,
            created_at: self.created_at,
        })
    }
}

#[derive(Clone)]
pub struct PgCollection<T> {
    pool: PgPool,
    clock: Arc<dyn Clock>,
    _doc: PhantomData<fn() -> T>,
}

impl<T: Document> PgCollection<T> {
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            clock,
            _doc: PhantomData,
        }
    }

    fn table(&self) -> &'static str {
        T::KIND.table()
    }

    fn rows_into_stored(rows: Vec<DocumentRow>) -> Result<Vec<Stored<T>>> {
        rows.into_iter().map(DocumentRow::into_stored).collect()
    }

    fn finish<R>(&self, operation: &str, started: Instant, result: Result<R>) -> Result<R> {
        let success = match &result {
            Ok(_) => true,
            Err(err) => err.is_client_error(),
        };
        log_database_operation(operation, self.table(), started.elapsed().as_millis() as u64, success);
        result
    }

    fn map_insert_error(&self, doc: &T, err: sqlx::Error) -> PortalError {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let field = doc
                    .unique_keys()
                    .first()
                    .map(|(field, _)| *field)
                    .unwrap_or("key");
                return duplicate_key(T::KIND, field);
            }
        }
        PortalError::Database(err)
    }
}

#[async_trait]
impl<T: Document> Collection<T> for PgCollection<T> {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, doc: T) -> Result<Stored<T>> {
        let started = Instant::now();
        let body = serde_json::to_value(&doc)?;

        // created_at never precedes the newest row already in the table
        let query = format!(
            r#"
            INSERT INTO {table} (id, body, created_at)
            VALUES ($1, $2, GREATEST($3, COALESCE((SELECT MAX(created_at) FROM {table}), $3)))
            RETURNING id, body, created_at
            "#,
            table = self.table()
        );

        let result = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(Uuid::new_v4())
            .bind(body)
            .bind(self.clock.now())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| self.map_insert_error(&doc, err))
            .and_then(DocumentRow::into_stored);

        self.finish("insert", started, result)
    }

    async fn list_all(&self) -> Result<Vec<Stored<T>>> {
        let started = Instant::now();
        let query = format!(
            "SELECT id, body, created_at FROM {} ORDER BY created_at DESC, seq DESC",
            self.table()
        );

        let result = sqlx::query_as::<_, DocumentRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(PortalError::from)
            .and_then(Self::rows_into_stored);

        self.finish("list_all", started, result)
    }

    async fn list_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Stored<T>>> {
        let started = Instant::now();
        let query = format!(
            r#"
            SELECT id, body, created_at FROM {}
            WHERE created_at >= $1 AND created_at < $2
            ORDER BY created_at DESC, seq DESC
            "#,
            self.table()
        );

        let result = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(PortalError::from)
            .and_then(Self::rows_into_stored);

        self.finish("list_between", started, result)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Stored<T>>> {
        let started = Instant::now();
        let query = format!(
            "SELECT id, body, created_at FROM {} ORDER BY created_at DESC, seq DESC LIMIT $1",
            self.table()
        );

        let result = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(PortalError::from)
            .and_then(Self::rows_into_stored);

        self.finish("list_recent", started, result)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Stored<T>> {
        let started = Instant::now();
        let query = format!("SELECT id, body, created_at FROM {} WHERE id = $1", self.table());

        let result = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(PortalError::from)
            .and_then(|row| row.ok_or_else(|| not_found(T::KIND)))
            .and_then(DocumentRow::into_stored);

        self.finish("find_by_id", started, result)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Stored<T>> {
        let started = Instant::now();
        let query = format!(
            "DELETE FROM {} WHERE id = $1 RETURNING id, body, created_at",
            self.table()
        );

        let result = sqlx::query_as::<_, DocumentRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(PortalError::from)
            .and_then(|row| row.ok_or_else(|| not_found(T::KIND)))
            .and_then(DocumentRow::into_stored);

        self.finish("delete_by_id", started, result)
    }

    async fn health_check(&self) -> Result<()> {
        crate::database::connection::health_check(&self.pool).await
    }
}
