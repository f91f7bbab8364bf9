//! Product repository: the central catalog entity plus its association
//! tables and measurement rows.

use chrono::Utc;
use sqlx::SqlitePool;

use lavka_core::{AccountId, ManufacturerId, MeasurementId, PriceId, ProductId};

use super::{RepositoryError, constraint_violation, corrupt_row};
use crate::models::{NewMeasurement, NewProduct, Product, ProductDetail, ProductMeasurement};

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new product authored by `author`. `pub_date` is set here and
    /// never updated afterwards.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if `author` or the group doesn't
    /// exist. Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        author: AccountId,
        new: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO product (author_id, name, art, description, image, group_id, pub_date) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             RETURNING id, author_id, name, art, description, image, group_id, pub_date",
        )
        .bind(author)
        .bind(new.name())
        .bind(new.art())
        .bind(new.description())
        .bind(new.image())
        .bind(new.group_id())
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(constraint_violation("author or group does not exist"))?;

        tracing::debug!(product_id = %product.id, author_id = %author, "product created");
        Ok(product)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, author_id, name, art, description, image, group_id, pub_date \
             FROM product WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(corrupt_row)?;
        Ok(product)
    }

    /// Get a product together with its supplier, manufacturer and price id
    /// sets and its measurement rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_detail(&self, id: ProductId) -> Result<Option<ProductDetail>, RepositoryError> {
        let Some(product) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let supplier_ids = sqlx::query_scalar::<_, AccountId>(
            "SELECT account_id FROM product_supplier WHERE product_id = ? ORDER BY account_id",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let manufacturer_ids = sqlx::query_scalar::<_, ManufacturerId>(
            "SELECT manufacturer_id FROM product_manufacturer \
             WHERE product_id = ? ORDER BY manufacturer_id",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let price_ids = sqlx::query_scalar::<_, PriceId>(
            "SELECT price_id FROM product_price WHERE product_id = ? ORDER BY price_id",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let measurements = self.measurements(id).await?;

        Ok(Some(ProductDetail {
            product,
            supplier_ids,
            manufacturer_ids,
            price_ids,
            measurements,
        }))
    }

    /// List all products, id ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, author_id, name, art, description, image, group_id, pub_date \
             FROM product ORDER BY id",
        )
        .fetch_all(self.pool)
        .await
        .map_err(corrupt_row)?;
        Ok(products)
    }

    /// Update a product's mutable fields. The acting account is passed
    /// explicitly; authorization (author or admin) is the calling layer's
    /// decision. `author_id` and `pub_date` never change.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new group doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        actor: AccountId,
        id: ProductId,
        changes: &NewProduct,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE product SET name = ?, art = ?, description = ?, image = ?, group_id = ? \
             WHERE id = ?",
        )
        .bind(changes.name())
        .bind(changes.art())
        .bind(changes.description())
        .bind(changes.image())
        .bind(changes.group_id())
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(constraint_violation("group does not exist"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        tracing::debug!(product_id = %id, actor_id = %actor, "product updated");
        Ok(())
    }

    /// Delete a product.
    ///
    /// Cascades to its measurement rows and association rows at the storage
    /// level.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Register an account as a supplier of a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the pair already exists or one
    /// side is missing. Returns `RepositoryError::Database` otherwise.
    pub async fn add_supplier(
        &self,
        product: ProductId,
        account: AccountId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO product_supplier (product_id, account_id) VALUES (?, ?)")
            .bind(product)
            .bind(account)
            .execute(self.pool)
            .await
            .map_err(constraint_violation("supplier already registered"))?;
        Ok(())
    }

    /// Associate a manufacturer with a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the pair already exists or one
    /// side is missing. Returns `RepositoryError::Database` otherwise.
    pub async fn add_manufacturer(
        &self,
        product: ProductId,
        manufacturer: ManufacturerId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO product_manufacturer (product_id, manufacturer_id) VALUES (?, ?)")
            .bind(product)
            .bind(manufacturer)
            .execute(self.pool)
            .await
            .map_err(constraint_violation("manufacturer already associated"))?;
        Ok(())
    }

    /// Attach an existing price row to a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the pair already exists or one
    /// side is missing. Returns `RepositoryError::Database` otherwise.
    pub async fn attach_price(
        &self,
        product: ProductId,
        price: PriceId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO product_price (product_id, price_id) VALUES (?, ?)")
            .bind(product)
            .bind(price)
            .execute(self.pool)
            .await
            .map_err(constraint_violation("price already attached"))?;
        Ok(())
    }

    /// Add a measurement row to a product.
    ///
    /// The (product, amount) pair is unique at the storage level: two racing
    /// inserts of the same amount resolve to one success and one conflict.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product already has a row
    /// with this amount (regardless of unit) or the product is missing.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_measurement(
        &self,
        product: ProductId,
        new: &NewMeasurement,
    ) -> Result<ProductMeasurement, RepositoryError> {
        let measurement = sqlx::query_as::<_, ProductMeasurement>(
            "INSERT INTO product_measurement (product_id, unit, amount) \
             VALUES (?, ?, ?) \
             RETURNING id, product_id, unit, amount",
        )
        .bind(product)
        .bind(new.unit())
        .bind(new.amount())
        .fetch_one(self.pool)
        .await
        .map_err(constraint_violation("amount already declared for this product"))?;
        Ok(measurement)
    }

    /// List a product's measurement rows, amount ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn measurements(
        &self,
        product: ProductId,
    ) -> Result<Vec<ProductMeasurement>, RepositoryError> {
        let measurements = sqlx::query_as::<_, ProductMeasurement>(
            "SELECT id, product_id, unit, amount FROM product_measurement \
             WHERE product_id = ? ORDER BY amount",
        )
        .bind(product)
        .fetch_all(self.pool)
        .await
        .map_err(corrupt_row)?;
        Ok(measurements)
    }

    /// Remove a measurement row.
    ///
    /// # Returns
    ///
    /// Returns `true` if the row was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove_measurement(&self, id: MeasurementId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM product_measurement WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
