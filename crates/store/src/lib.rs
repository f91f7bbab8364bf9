//! Lavka Store - the persisted data model of the storefront.
//!
//! This crate owns the relational schema and the code around it: validated
//! domain models, sqlx repositories, and the account email-verification flow.
//! It has no network-facing protocol of its own; an external web/API layer
//! drives the repositories and triggers
//! [`VerificationService::send_confirmation_code`].
//!
//! # Modules
//!
//! - [`config`] - Environment-based configuration
//! - [`db`] - Connection pool, migrations, repositories
//! - [`models`] - Domain types and validated inputs
//! - [`services`] - Verification tokens and outbound mail
//!
//! # Error model
//!
//! Three kinds, none ever swallowed:
//!
//! - [`models::ValidationError`] - a field failed a declared constraint;
//!   raised before any write
//! - [`db::RepositoryError`] - storage-level failures;
//!   [`db::RepositoryError::Conflict`] marks expected, recoverable
//!   uniqueness/referential violations
//! - [`services::MailError`] - mail transport failures, propagated to the
//!   caller with no automatic retry
//!
//! [`VerificationService::send_confirmation_code`]:
//!     services::VerificationService::send_confirmation_code

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;
pub mod services;
