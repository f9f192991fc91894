//! Repository Module
//!
//! Data access layer for the web service.
//! [`JobStore`] is the storage contract; the in-memory store backs tests and
//! database-less runs, the PostgreSQL store backs deployments.

mod job;
mod memory;
mod postgres;

// Re-export trait and errors
pub use job::{JobStore, StoreError};

// Re-export implementations
pub use memory::InMemoryJobStore;
pub use postgres::PgJobStore;
