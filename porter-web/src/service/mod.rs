//! Service Module
//!
//! Business logic layer for the web service.
//! Services orchestrate between the job store and authorization capabilities
//! and contain the domain rules for each step of a job's lifecycle.

pub mod import_setup;

// Re-export for convenience
pub use import_setup::{ImportSetupError, ImportSetupService, InvalidStateReason};
