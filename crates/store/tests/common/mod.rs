//! Shared fixtures for integration tests.
//!
//! Every test runs against its own in-memory `SQLite` database with the full
//! migration set applied, so the storage-level constraints (unique indexes,
//! cascades, foreign keys) are the real thing.

#![allow(dead_code)]

use std::sync::Once;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::EnvFilter;

use lavka_core::{AccountId, Email, GroupId, Slug};
use lavka_store::db::{self, AccountRepository, GroupRepository, ProductRepository};
use lavka_store::models::{Account, Group, NewAccount, NewGroup, NewProduct, Product};

static TRACING: Once = Once::new();

/// Route repository and service tracing into the test output, once per test
/// binary. Filtered by `RUST_LOG` as usual.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Fresh in-memory database with migrations applied.
///
/// A single pooled connection keeps every query on the same in-memory
/// database.
pub async fn test_pool() -> SqlitePool {
    init_tracing();
    let options = "sqlite::memory:"
        .parse::<SqliteConnectOptions>()
        .expect("valid connection string")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("connect to in-memory database");

    db::MIGRATOR.run(&pool).await.expect("run migrations");
    pool
}

/// Insert an account with plausible contact fields.
pub async fn create_account(pool: &SqlitePool, username: &str) -> Account {
    let email = Email::parse(&format!("{username}@example.com")).expect("valid email");
    let new = NewAccount::new(
        username,
        email,
        "Russia",
        "Kazan",
        "Bauman st. 1",
        "+79990001122",
    )
    .expect("valid account input");

    AccountRepository::new(pool)
        .create(&new)
        .await
        .expect("create account")
}

/// Insert a product group.
pub async fn create_group(pool: &SqlitePool, name: &str, slug: &str) -> Group {
    let slug = Slug::parse(slug).expect("valid slug");
    let new = NewGroup::new(name, slug).expect("valid group input");
    GroupRepository::new(pool)
        .create(&new)
        .await
        .expect("create group")
}

/// Insert a product authored by `author` in `group`.
pub async fn create_product(
    pool: &SqlitePool,
    author: AccountId,
    group: GroupId,
    name: &str,
    art: &str,
) -> Product {
    let new = NewProduct::new(name, art, "", "", group).expect("valid product input");
    ProductRepository::new(pool)
        .create(author, &new)
        .await
        .expect("create product")
}
