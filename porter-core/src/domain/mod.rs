//! Core domain types
//!
//! This module contains the core domain structures used across Porter services.
//! These types represent the fundamental business entities and are shared between
//! the web service (persists and transitions jobs) and the client/CLI (displays them).

pub mod auth;
pub mod data_type;
pub mod job;
