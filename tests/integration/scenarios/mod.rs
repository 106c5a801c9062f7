//! End-to-end scenarios spanning several endpoints
