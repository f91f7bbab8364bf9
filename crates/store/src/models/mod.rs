//! Domain model types.
//!
//! Each persisted entity has two shapes: the stored row type (`Account`,
//! `Product`, ...) decoded straight from the database, and a validated input
//! type (`NewAccount`, `NewProduct`, ...) whose constructor is the only way to
//! build it. Field rules are checked there, before any write is attempted, so
//! an invalid insert request cannot exist as a value.

pub mod account;
pub mod catalog;
pub mod order;

pub use account::{Account, ContactUpdate, NewAccount, Username};
pub use catalog::{
    Group, Manufacturer, NewGroup, NewManufacturer, NewMeasurement, NewPrice, NewProduct, Price,
    Product, ProductDetail, ProductMeasurement,
};
pub use order::{NewOrder, Order, OrderDetail};

/// Errors raised when a field fails a declared constraint.
///
/// These are rejected-input errors: the caller should fix the input, not
/// retry. They are always raised before any write is attempted.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValidationError {
    /// A required string field is empty.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// A price cost below the minimum of 1.
    #[error("cost must be at least 1, got {0}")]
    CostBelowMinimum(f64),

    /// A measurement amount that is zero or negative.
    #[error("amount must be greater than zero, got {0}")]
    AmountNotPositive(i64),

    /// An order with no measurements.
    #[error("an order must contain at least one measurement")]
    EmptyOrder,
}

/// Check that a required string field is non-empty (whitespace-only counts
/// as empty).
pub(crate) fn required(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(value)
}
