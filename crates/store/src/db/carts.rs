//! Cart and favorites repositories.
//!
//! Both tables are pure (account, product) membership rows with a unique
//! index on the pair. A duplicate add fails with
//! [`RepositoryError::Conflict`]; idempotent-add is the caller's decision
//! (catch and ignore the conflict), never silent deduplication here.

use sqlx::SqlitePool;

use lavka_core::{AccountId, ProductId};

use super::{RepositoryError, constraint_violation};

/// Repository for shopping-cart membership rows.
///
/// The cart associates accounts to products directly, not to a specific
/// measurement, and carries no quantity; quantity, if needed, is tracked by
/// the surrounding application layer.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Put a product into an account's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product is already in the
    /// cart or either side is missing. Returns `RepositoryError::Database`
    /// for other database errors.
    pub async fn add(&self, account: AccountId, product: ProductId) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO shop_cart (account_id, product_id) VALUES (?, ?)")
            .bind(account)
            .bind(product)
            .execute(self.pool)
            .await
            .map_err(constraint_violation("product already in cart"))?;
        Ok(())
    }

    /// Remove a product from an account's cart.
    ///
    /// # Returns
    ///
    /// Returns `true` if a row was removed, `false` if the product wasn't in
    /// the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(
        &self,
        account: AccountId,
        product: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM shop_cart WHERE account_id = ? AND product_id = ?")
            .bind(account)
            .bind(product)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the product ids in an account's cart, id ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn products_for(
        &self,
        account: AccountId,
    ) -> Result<Vec<ProductId>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, ProductId>(
            "SELECT product_id FROM shop_cart WHERE account_id = ? ORDER BY product_id",
        )
        .bind(account)
        .fetch_all(self.pool)
        .await?;
        Ok(ids)
    }
}

/// Repository for favorite-product rows.
pub struct FavoriteRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FavoriteRepository<'a> {
    /// Create a new favorites repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Mark a product as a favorite of an account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product is already a
    /// favorite or either side is missing. Returns
    /// `RepositoryError::Database` for other database errors.
    pub async fn add(&self, account: AccountId, product: ProductId) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO favorite (account_id, product_id) VALUES (?, ?)")
            .bind(account)
            .bind(product)
            .execute(self.pool)
            .await
            .map_err(constraint_violation("product already in favorites"))?;
        Ok(())
    }

    /// Remove a product from an account's favorites.
    ///
    /// # Returns
    ///
    /// Returns `true` if a row was removed, `false` if the product wasn't a
    /// favorite.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(
        &self,
        account: AccountId,
        product: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM favorite WHERE account_id = ? AND product_id = ?")
            .bind(account)
            .bind(product)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the product ids an account has favorited, id ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn products_for(
        &self,
        account: AccountId,
    ) -> Result<Vec<ProductId>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, ProductId>(
            "SELECT product_id FROM favorite WHERE account_id = ? ORDER BY product_id",
        )
        .bind(account)
        .fetch_all(self.pool)
        .await?;
        Ok(ids)
    }
}
