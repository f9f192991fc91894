//! Porter Core
//!
//! Core types and abstractions for the Porter data-portability service.
//!
//! This crate contains:
//! - Domain types: Portability jobs, data types, authorization data and phases
//! - DTOs: Data transfer objects exchanged over the HTTP API
//! - Token: The reversible job-id <-> job-token encoding

pub mod domain;
pub mod dto;
pub mod token;
