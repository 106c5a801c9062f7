//! Integration tests module
//!
//! This module contains all integration tests for the admissions API,
//! organized by endpoint group and end-to-end scenarios.

pub mod handlers;
pub mod postgres_store_test;
pub mod scenarios;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("admissions_api=debug")
            .with_test_writer()
            .try_init();
    });
}
