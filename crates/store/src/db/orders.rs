//! Order repository.

use chrono::Utc;
use sqlx::SqlitePool;

use lavka_core::{AccountId, MeasurementId, OrderId, OrderStatus};

use super::{RepositoryError, constraint_violation, corrupt_row};
use crate::models::{NewOrder, Order, OrderDetail};

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Place an order for `account` over the given measurement rows.
    ///
    /// The order row and its item rows are written in one transaction:
    /// either the whole basket is persisted or nothing is. `pub_date` is set
    /// here and never updated afterwards.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the account or one of the
    /// measurements doesn't exist, or a measurement is listed twice.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        account: AccountId,
        new: &NewOrder,
    ) -> Result<OrderDetail, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            "INSERT INTO shop_order (account_id, status, pub_date) VALUES (?, ?, ?) \
             RETURNING id, account_id, status, pub_date",
        )
        .bind(account)
        .bind(new.status())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(constraint_violation("account does not exist"))?;

        for &measurement in new.measurement_ids() {
            sqlx::query("INSERT INTO order_item (order_id, measurement_id) VALUES (?, ?)")
                .bind(order.id)
                .bind(measurement)
                .execute(&mut *tx)
                .await
                .map_err(constraint_violation("measurement missing or listed twice"))?;
        }

        tx.commit().await?;

        tracing::debug!(order_id = %order.id, account_id = %account, "order placed");
        Ok(OrderDetail {
            order,
            measurement_ids: new.measurement_ids().to_vec(),
        })
    }

    /// Get an order with its measurement ids.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<OrderDetail>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, account_id, status, pub_date FROM shop_order WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(corrupt_row)?;

        let Some(order) = order else {
            return Ok(None);
        };

        let measurement_ids = sqlx::query_scalar::<_, MeasurementId>(
            "SELECT measurement_id FROM order_item WHERE order_id = ? ORDER BY measurement_id",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(OrderDetail {
            order,
            measurement_ids,
        }))
    }

    /// Set an order's status.
    ///
    /// Any of the eight statuses is accepted; no transition graph is
    /// enforced.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE shop_order SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        tracing::debug!(order_id = %id, status = %status, "order status updated");
        Ok(())
    }

    /// List an account's orders, id ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_account(&self, account: AccountId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, account_id, status, pub_date FROM shop_order \
             WHERE account_id = ? ORDER BY id",
        )
        .bind(account)
        .fetch_all(self.pool)
        .await
        .map_err(corrupt_row)?;
        Ok(orders)
    }

    /// Delete an order. Cascades to its item rows.
    ///
    /// # Returns
    ///
    /// Returns `true` if the order was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM shop_order WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
