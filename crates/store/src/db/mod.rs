//! Database operations for the storefront `SQLite` database.
//!
//! ## Tables
//!
//! - `account` - Registered users with contact fields and role flag
//! - `product`, `price`, `product_measurement`, `manufacturer`,
//!   `product_group` - Catalog
//! - `product_supplier`, `product_manufacturer`, `product_price` - Catalog
//!   association tables
//! - `shop_cart`, `favorite` - Per-account product membership
//! - `shop_order`, `order_item` - Orders over measured stock units
//!
//! # Migrations
//!
//! Migrations are stored in `crates/store/migrations/` and embedded at
//! compile time via [`MIGRATOR`]; call [`Migrator::run`] on a fresh pool
//! before using any repository.
//!
//! [`Migrator::run`]: sqlx::migrate::Migrator::run

pub mod accounts;
pub mod carts;
pub mod catalog;
pub mod orders;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use accounts::AccountRepository;
pub use carts::{CartRepository, FavoriteRepository};
pub use catalog::{GroupRepository, ManufacturerRepository, PriceRepository};
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (unique index or foreign key).
    ///
    /// This is an expected, recoverable condition - "already in cart",
    /// "duplicate amount" - that callers translate into a domain-level
    /// "already exists" response rather than a system failure.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// True if this error is a constraint violation.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// Map a sqlx error into [`RepositoryError`], turning unique-index and
/// foreign-key violations into [`RepositoryError::Conflict`] with the given
/// context.
pub(crate) fn constraint_violation(context: &'static str) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
                return RepositoryError::Conflict(context.to_owned());
            }
        }
        RepositoryError::Database(e)
    }
}

/// Map a read-path sqlx error into [`RepositoryError`], turning row-decode
/// failures (an enum column holding a string outside its closed set, a
/// malformed timestamp) into [`RepositoryError::DataCorruption`].
pub(crate) fn corrupt_row(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::ColumnDecode { index, source } => {
            RepositoryError::DataCorruption(format!("column {index}: {source}"))
        }
        other => RepositoryError::Database(other),
    }
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// Foreign-key enforcement is switched on for every connection; the cascade
/// and integrity rules in the schema depend on it.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database URL is invalid or the connection
/// cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = database_url
        .expose_secret()
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(10));

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
