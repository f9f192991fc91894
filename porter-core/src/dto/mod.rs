//! Data Transfer Objects for the HTTP API
//!
//! This module contains DTOs exchanged between the Porter web service and its
//! clients (browser front-end, CLI). Field names follow the JSON keys the
//! front-end expects.

pub mod error;
pub mod import_setup;
