//! Database module
//!
//! This module handles database connections and the record store

pub mod collection;
pub mod connection;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use collection::Collection;
pub use connection::{create_pool, health_check, run_migrations, DatabasePool};
pub use repositories::{InMemoryCollection, PgCollection};
pub use service::{Collected, RecordStore};
