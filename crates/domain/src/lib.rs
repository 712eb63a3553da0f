//! Domain layer for the Boxing Academy backend.
//!
//! This crate contains:
//! - Domain models (content, catalog, cart, membership, schedule, FAQ, chat)
//! - The chatbot resolution pipeline and the catalog query services
//! - Domain error types

pub mod models;
pub mod services;
