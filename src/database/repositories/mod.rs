//! Database repositories module
//!
//! This module contains the collection backends for data access

pub mod memory;
pub mod postgres;

// Re-export repositories
pub use memory::InMemoryCollection;
pub use postgres::PgCollection;
