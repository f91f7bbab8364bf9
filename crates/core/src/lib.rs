//! Lavka Core - Shared types library.
//!
//! This crate provides the validated domain types used across the Lavka
//! storefront components:
//!
//! - `store` - The persisted data model and its repositories
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. Database bindings for the wrappers are gated behind the `sqlite`
//! feature so consumers that never touch storage stay lightweight.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, `Email`, `Slug`, and the closed enumerations
//!   that form the storage contract

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
