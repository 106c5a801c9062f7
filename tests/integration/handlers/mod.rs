//! Endpoint tests grouped by handler module

pub mod records_test;
