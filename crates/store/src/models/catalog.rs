//! Catalog domain types: products, prices, measurements, manufacturers,
//! groups.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use lavka_core::{
    AccountId, Currency, GroupId, ManufacturerId, MeasurementId, PriceId, ProductId, Slug, Unit,
};

use super::{ValidationError, required};

/// Minimum allowed price cost.
pub const MIN_COST: f64 = 1.0;

/// A sellable item.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Account that created the product.
    pub author_id: AccountId,
    /// Display name. Required, non-empty.
    pub name: String,
    /// Article code. Required, non-empty.
    pub art: String,
    pub description: String,
    /// Image reference (path or URL).
    pub image: String,
    /// Group the product is classified under.
    pub group_id: GroupId,
    /// When the product was published. Set once at insert, never mutated.
    pub pub_date: DateTime<Utc>,
}

/// A product together with its association sets.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    /// Supplier account ids.
    pub supplier_ids: Vec<AccountId>,
    pub manufacturer_ids: Vec<ManufacturerId>,
    pub price_ids: Vec<PriceId>,
    pub measurements: Vec<ProductMeasurement>,
}

/// Validated input for creating or updating a [`Product`].
#[derive(Debug, Clone)]
pub struct NewProduct {
    name: String,
    art: String,
    description: String,
    image: String,
    group_id: GroupId,
}

impl NewProduct {
    /// Validate the product fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] if `name` or `art` is empty.
    pub fn new(
        name: impl Into<String>,
        art: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        group_id: GroupId,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("name", name.into())?,
            art: required("art", art.into())?,
            description: description.into(),
            image: image.into(),
            group_id,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn art(&self) -> &str {
        &self.art
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    #[must_use]
    pub const fn group_id(&self) -> GroupId {
        self.group_id
    }
}

/// A currency-denominated price row.
///
/// Prices are independent entities attached to products through a join table;
/// a product may be listed in several currencies at once.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Price {
    pub id: PriceId,
    /// Cost in `currency` units. Always >= 1.
    pub cost: f64,
    pub currency: Currency,
}

/// Validated input for creating a [`Price`].
#[derive(Debug, Clone, Copy)]
pub struct NewPrice {
    cost: f64,
    currency: Currency,
}

impl NewPrice {
    /// Validate the cost.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CostBelowMinimum`] for costs below 1; the
    /// value is rejected, never clamped.
    pub fn new(cost: f64, currency: Currency) -> Result<Self, ValidationError> {
        if cost < MIN_COST || !cost.is_finite() {
            return Err(ValidationError::CostBelowMinimum(cost));
        }
        Ok(Self { cost, currency })
    }

    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }
}

/// A stocked unit variant of a product (e.g. the 500g pack vs the 1kg pack).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductMeasurement {
    pub id: MeasurementId,
    pub product_id: ProductId,
    pub unit: Unit,
    /// Numeric amount in `unit`. Unique per product regardless of unit.
    pub amount: i64,
}

/// Validated input for creating a [`ProductMeasurement`].
#[derive(Debug, Clone, Copy)]
pub struct NewMeasurement {
    unit: Unit,
    amount: i64,
}

impl NewMeasurement {
    /// Validate the amount.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AmountNotPositive`] if `amount` is zero or
    /// negative.
    pub fn new(unit: Unit, amount: i64) -> Result<Self, ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::AmountNotPositive(amount));
        }
        Ok(Self { unit, amount })
    }

    #[must_use]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }
}

/// A product manufacturer. Pure lookup entity.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Manufacturer {
    pub id: ManufacturerId,
    pub name: String,
    pub description: String,
    pub image: String,
}

/// Validated input for creating a [`Manufacturer`].
#[derive(Debug, Clone)]
pub struct NewManufacturer {
    name: String,
    description: String,
    image: String,
}

impl NewManufacturer {
    /// Validate the name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] if `name` is empty.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("name", name.into())?,
            description: description.into(),
            image: image.into(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }
}

/// A product group. Lookup entity addressed externally by slug.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub slug: Slug,
}

/// Validated input for creating a [`Group`].
#[derive(Debug, Clone)]
pub struct NewGroup {
    name: String,
    slug: Slug,
}

impl NewGroup {
    /// Validate the name. The slug validates itself at parse time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] if `name` is empty.
    pub fn new(name: impl Into<String>, slug: Slug) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("name", name.into())?,
            slug,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn slug(&self) -> &Slug {
        &self.slug
    }
}
