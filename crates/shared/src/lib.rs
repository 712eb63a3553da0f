//! Shared utilities and common types for the Boxing Academy backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Money arithmetic in integer cents
//! - Keyword normalization and text matching
//! - Admin API key hashing and generation
//! - Password hashing with Argon2id and JWT access tokens
//! - Cursor pagination and validation helpers

pub mod crypto;
pub mod jwt;
pub mod money;
pub mod pagination;
pub mod password;
pub mod text;
pub mod validation;
