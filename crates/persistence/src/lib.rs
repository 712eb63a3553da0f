//! Persistence layer for the Boxing Academy backend.
//!
//! This crate contains:
//! - Database connection management
//! - SQL migrations (`src/migrations`)
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - Query timing metrics

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
