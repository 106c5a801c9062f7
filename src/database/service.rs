//! Record store
//!
//! Bundles one collection per record kind behind a single handle that the
//! HTTP layer shares across requests.

use std::sync::Arc;

use crate::database::collection::Collection;
use crate::database::{DatabasePool, InMemoryCollection, PgCollection};
use crate::models::{AdminLead, Applicant, ContactMessage, Document, NewsPost};
use crate::utils::clock::Clock;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct RecordStore {
    pub admins: Arc<dyn Collection<AdminLead>>,
    pub applicants: Arc<dyn Collection<Applicant>>,
    pub messages: Arc<dyn Collection<ContactMessage>>,
    pub news: Arc<dyn Collection<NewsPost>>,
}

impl RecordStore {
    pub fn postgres(pool: DatabasePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            admins: Arc::new(PgCollection::<AdminLead>::new(pool.clone(), clock.clone())),
            applicants: Arc::new(PgCollection::<Applicant>::new(pool.clone(), clock.clone())),
            messages: Arc::new(PgCollection::<ContactMessage>::new(pool.clone(), clock.clone())),
            news: Arc::new(PgCollection::<NewsPost>::new(pool, clock)),
        }
    }

    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self {
            admins: InMemoryCollection::<AdminLead>::shared(clock.clone()),
            applicants: InMemoryCollection::<Applicant>::shared(clock.clone()),
            messages: InMemoryCollection::<ContactMessage>::shared(clock.clone()),
            news: InMemoryCollection::<NewsPost>::shared(clock),
        }
    }

    /// Collection holding documents of type `T`
    pub fn collection<T: Collected>(&self) -> &Arc<dyn Collection<T>> {
        T::collection(self)
    }

    pub fn backend(&self) -> &'static str {
        self.admins.backend()
    }

    /// All collections share one backend, so probing one is enough
    pub async fn health_check(&self) -> Result<()> {
        self.admins.health_check().await
    }
}

/// Maps a document type onto its collection inside a [`RecordStore`]
pub trait Collected: Document {
    fn collection(store: &RecordStore) -> &Arc<dyn Collection<Self>>;
}

impl Collected for AdminLead {
    fn collection(store: &RecordStore) -> &Arc<dyn Collection<Self>> {
        &store.admins
    }
}

impl Collected for Applicant {
    fn collection(store: &RecordStore) -> &Arc<dyn Collection<Self>> {
        &store.applicants
    }
}

impl Collected for ContactMessage {
    fn collection(store: &RecordStore) -> &Arc<dyn Collection<Self>> {
        &store.messages
    }
}

impl Collected for NewsPost {
    fn collection(store: &RecordStore) -> &Arc<dyn Collection<Self>> {
        &store.news
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("backend", &self.backend())
            .finish()
    }
}
