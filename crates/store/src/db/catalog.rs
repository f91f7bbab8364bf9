//! Lookup-entity repositories: prices, manufacturers, product groups.

use sqlx::SqlitePool;

use lavka_core::{GroupId, ManufacturerId, PriceId, Slug};

use super::{RepositoryError, constraint_violation, corrupt_row};
use crate::models::{Group, Manufacturer, NewGroup, NewManufacturer, NewPrice, Price};

/// Repository for price rows.
pub struct PriceRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PriceRepository<'a> {
    /// Create a new price repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a price row. Cost was already validated (>= 1) by
    /// [`NewPrice::new`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: &NewPrice) -> Result<Price, RepositoryError> {
        let price = sqlx::query_as::<_, Price>(
            "INSERT INTO price (cost, currency) VALUES (?, ?) RETURNING id, cost, currency",
        )
        .bind(new.cost())
        .bind(new.currency())
        .fetch_one(self.pool)
        .await?;
        Ok(price)
    }

    /// Get a price by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: PriceId) -> Result<Option<Price>, RepositoryError> {
        let price = sqlx::query_as::<_, Price>("SELECT id, cost, currency FROM price WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(corrupt_row)?;
        Ok(price)
    }
}

/// Repository for manufacturers.
pub struct ManufacturerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ManufacturerRepository<'a> {
    /// Create a new manufacturer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a manufacturer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: &NewManufacturer) -> Result<Manufacturer, RepositoryError> {
        let manufacturer = sqlx::query_as::<_, Manufacturer>(
            "INSERT INTO manufacturer (name, description, image) VALUES (?, ?, ?) \
             RETURNING id, name, description, image",
        )
        .bind(new.name())
        .bind(new.description())
        .bind(new.image())
        .fetch_one(self.pool)
        .await?;
        Ok(manufacturer)
    }

    /// Get a manufacturer by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: ManufacturerId,
    ) -> Result<Option<Manufacturer>, RepositoryError> {
        let manufacturer = sqlx::query_as::<_, Manufacturer>(
            "SELECT id, name, description, image FROM manufacturer WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(manufacturer)
    }

    /// List all manufacturers, id ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Manufacturer>, RepositoryError> {
        let manufacturers = sqlx::query_as::<_, Manufacturer>(
            "SELECT id, name, description, image FROM manufacturer ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(manufacturers)
    }
}

/// Repository for product groups.
pub struct GroupRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GroupRepository<'a> {
    /// Create a new group repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a group.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewGroup) -> Result<Group, RepositoryError> {
        let group = sqlx::query_as::<_, Group>(
            "INSERT INTO product_group (name, slug) VALUES (?, ?) RETURNING id, name, slug",
        )
        .bind(new.name())
        .bind(new.slug())
        .fetch_one(self.pool)
        .await
        .map_err(constraint_violation("slug already exists"))?;
        Ok(group)
    }

    /// Get a group by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: GroupId) -> Result<Option<Group>, RepositoryError> {
        let group =
            sqlx::query_as::<_, Group>("SELECT id, name, slug FROM product_group WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;
        Ok(group)
    }

    /// Get a group by its slug (the external addressing key).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &Slug) -> Result<Option<Group>, RepositoryError> {
        let group =
            sqlx::query_as::<_, Group>("SELECT id, name, slug FROM product_group WHERE slug = ?")
                .bind(slug)
                .fetch_optional(self.pool)
                .await?;
        Ok(group)
    }

    /// List all groups, name ascending (the group's default ordering).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Group>, RepositoryError> {
        let groups = sqlx::query_as::<_, Group>(
            "SELECT id, name, slug FROM product_group ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(groups)
    }
}
