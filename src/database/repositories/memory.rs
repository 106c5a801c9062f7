//! In-process collection backend
//!
//! Used by the test suite and when the service runs with `database.url = "memory"`.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::collection::{duplicate_key, not_found, Collection};
use crate::models::{Document, Stored};
use crate::utils::clock::Clock;
use crate::utils::errors::Result;

pub struct InMemoryCollection<T> {
    // Insertion order; created_at is clamped so this is also timestamp order.
    records: RwLock<Vec<Stored<T>>>,
    clock: Arc<dyn Clock>,
    _doc: PhantomData<fn() -> T>,
}

impl<T: Document> InMemoryCollection<T> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            clock,
            _doc: PhantomData,
        }
    }

    pub fn shared(clock: Arc<dyn Clock>) -> Arc<Self> {
        Arc::new(Self::new(clock))
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl<T: Document> Collection<T> for InMemoryCollection<T> {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, doc: T) -> Result<Stored<T>> {
        let mut records = self.records.write().await;

        for (field, value) in doc.unique_keys() {
            let taken = records.iter().any(|existing| {
                existing
                    .doc
                    .unique_keys()
                    .iter()
                    .any(|(f, v)| *f == field && *v == value)
            });
            if taken {
                return Err(duplicate_key(T::KIND, field));
            }
        }

        let mut created_at = self.clock.now();
        if let Some(last) = records.last() {
            created_at = created_at.max(last.created_at);
        }

        let stored = Stored::new(doc, created_at);
        records.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Stored<T>>> {
        Ok(self.records.read().await.iter().rev().cloned().collect())
    }

    async fn list_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Stored<T>>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .rev()
            .filter(|r| r.created_at >= start && r.created_at < end)
            .cloned()
            .collect())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Stored<T>>> {
        Ok(self.records.read().await.iter().rev().take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Stored<T>> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| not_found(T::KIND))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Stored<T>> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| not_found(T::KIND))?;
        Ok(records.remove(index))
    }
}
