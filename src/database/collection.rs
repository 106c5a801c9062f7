//! Collection abstraction shared by every storage backend

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Document, RecordKind, Stored};
use crate::utils::errors::{PortalError, Result};
use crate::utils::helpers::month_bounds;

/// Append/delete-only collection of one record kind.
///
/// Listings are ordered by `created_at` descending; records sharing a
/// timestamp come back in reverse insertion order.
#[async_trait]
pub trait Collection<T: Document>: Send + Sync {
    /// Short tag of the backend, used in logs
    fn backend(&self) -> &'static str;

    /// Store `doc`, assigning its id and `created_at`.
    ///
    /// Fails with `ConstraintViolation` when a unique key is already taken.
    async fn insert(&self, doc: T) -> Result<Stored<T>>;

    async fn list_all(&self) -> Result<Vec<Stored<T>>>;

    /// Records with `start <= created_at < end`
    async fn list_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Stored<T>>>;

    async fn list_recent(&self, limit: usize) -> Result<Vec<Stored<T>>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Stored<T>>;

    async fn delete_by_id(&self, id: Uuid) -> Result<Stored<T>>;

    /// Records created during the given UTC calendar month (1-indexed)
    async fn list_by_month(&self, year: i32, month: u32) -> Result<Vec<Stored<T>>> {
        let (start, end) = month_bounds(year, month)?;
        self.list_between(start, end).await
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

pub(crate) fn not_found(kind: RecordKind) -> PortalError {
    PortalError::NotFound(kind.label().to_string())
}

pub(crate) fn duplicate_key(kind: RecordKind, field: &str) -> PortalError {
    PortalError::ConstraintViolation(format!("{} with this {} already exists", kind.label(), field))
}
