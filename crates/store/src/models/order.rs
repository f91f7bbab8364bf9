//! Order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use lavka_core::{AccountId, MeasurementId, OrderId, OrderStatus};

use super::ValidationError;

/// A placed order: a basket of specific measured stock units.
///
/// Status is a freely-settable enumeration; no transition graph is enforced
/// at this layer.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: OrderId,
    pub account_id: AccountId,
    pub status: OrderStatus,
    /// When the order was placed. Set once at insert, never mutated.
    pub pub_date: DateTime<Utc>,
}

/// An order together with the measurement rows it references.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    pub order: Order,
    pub measurement_ids: Vec<MeasurementId>,
}

/// Validated input for creating an [`Order`].
#[derive(Debug, Clone)]
pub struct NewOrder {
    measurement_ids: Vec<MeasurementId>,
    status: OrderStatus,
}

impl NewOrder {
    /// Validate the order contents. Status defaults to
    /// [`OrderStatus::Accepted`] when `None` is given.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyOrder`] if no measurements are given.
    pub fn new(
        measurement_ids: Vec<MeasurementId>,
        status: Option<OrderStatus>,
    ) -> Result<Self, ValidationError> {
        if measurement_ids.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }
        Ok(Self {
            measurement_ids,
            status: status.unwrap_or_default(),
        })
    }

    #[must_use]
    pub fn measurement_ids(&self) -> &[MeasurementId] {
        &self.measurement_ids
    }

    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }
}
