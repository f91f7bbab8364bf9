//! Closed string enumerations of the storage contract.
//!
//! The string values below are wire/storage values shared with the existing
//! database and its consumers. The Russian order-status and unit strings are
//! part of that contract and must not be translated or re-cased.

use serde::{Deserialize, Serialize};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "lowercase"))]
pub enum Role {
    /// Regular shopper. The default for new accounts.
    #[default]
    User,
    Moderator,
    Admin,
}

impl Role {
    /// Storage string for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "moderator" => Ok(Self::Moderator),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Currency a price is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
pub enum Currency {
    /// Russian rouble. The default for new prices.
    #[default]
    RUR,
    USD,
    EUR,
}

impl Currency {
    /// Storage string for this currency.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RUR => "RUR",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RUR" => Ok(Self::RUR),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            _ => Err(format!("invalid currency: {s}")),
        }
    }
}

/// Stock-keeping unit of a product measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
pub enum Unit {
    #[serde(rename = "Штука")]
    #[cfg_attr(feature = "sqlite", sqlx(rename = "Штука"))]
    Piece,
    #[serde(rename = "Килограмм")]
    #[cfg_attr(feature = "sqlite", sqlx(rename = "Килограмм"))]
    Kilogram,
    #[serde(rename = "Грамм")]
    #[cfg_attr(feature = "sqlite", sqlx(rename = "Грамм"))]
    Gram,
    #[serde(rename = "Литр")]
    #[cfg_attr(feature = "sqlite", sqlx(rename = "Литр"))]
    Litre,
    #[serde(rename = "Упаковка")]
    #[cfg_attr(feature = "sqlite", sqlx(rename = "Упаковка"))]
    Pack,
    #[serde(rename = "Миллилитр")]
    #[cfg_attr(feature = "sqlite", sqlx(rename = "Миллилитр"))]
    Millilitre,
}

impl Unit {
    /// Storage string for this unit.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Piece => "Штука",
            Self::Kilogram => "Килограмм",
            Self::Gram => "Грамм",
            Self::Litre => "Литр",
            Self::Pack => "Упаковка",
            Self::Millilitre => "Миллилитр",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Штука" => Ok(Self::Piece),
            "Килограмм" => Ok(Self::Kilogram),
            "Грамм" => Ok(Self::Gram),
            "Литр" => Ok(Self::Litre),
            "Упаковка" => Ok(Self::Pack),
            "Миллилитр" => Ok(Self::Millilitre),
            _ => Err(format!("invalid unit: {s}")),
        }
    }
}

/// Order status.
///
/// Eight fixed values; new orders default to [`OrderStatus::Accepted`].
/// No transition graph is enforced here - status is freely settable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
pub enum OrderStatus {
    /// Accepted by the shop. The default for new orders.
    #[default]
    #[serde(rename = "Принят")]
    #[cfg_attr(feature = "sqlite", sqlx(rename = "Принят"))]
    Accepted,
    #[serde(rename = "Самовывоз")]
    #[cfg_attr(feature = "sqlite", sqlx(rename = "Самовывоз"))]
    Pickup,
    #[serde(rename = "Доставка")]
    #[cfg_attr(feature = "sqlite", sqlx(rename = "Доставка"))]
    Delivery,
    #[serde(rename = "Отменен")]
    #[cfg_attr(feature = "sqlite", sqlx(rename = "Отменен"))]
    Canceled,
    #[serde(rename = "Ожидает отмены")]
    #[cfg_attr(feature = "sqlite", sqlx(rename = "Ожидает отмены"))]
    PendingCancel,
    #[serde(rename = "Ожидает поступления")]
    #[cfg_attr(feature = "sqlite", sqlx(rename = "Ожидает поступления"))]
    AwaitingRestock,
    #[serde(rename = "Собирается")]
    #[cfg_attr(feature = "sqlite", sqlx(rename = "Собирается"))]
    Assembling,
    #[serde(rename = "Возврат")]
    #[cfg_attr(feature = "sqlite", sqlx(rename = "Возврат"))]
    Refund,
}

impl OrderStatus {
    /// Storage string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "Принят",
            Self::Pickup => "Самовывоз",
            Self::Delivery => "Доставка",
            Self::Canceled => "Отменен",
            Self::PendingCancel => "Ожидает отмены",
            Self::AwaitingRestock => "Ожидает поступления",
            Self::Assembling => "Собирается",
            Self::Refund => "Возврат",
        }
    }

    /// All valid statuses, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Accepted,
        Self::Pickup,
        Self::Delivery,
        Self::Canceled,
        Self::PendingCancel,
        Self::AwaitingRestock,
        Self::Assembling,
        Self::Refund,
    ];
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("invalid order status: {s}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Role::default(), Role::User);
        assert_eq!(Currency::default(), Currency::RUR);
        assert_eq!(OrderStatus::default(), OrderStatus::Accepted);
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::User, Role::Moderator, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_order_status_wire_strings() {
        assert_eq!(OrderStatus::Accepted.as_str(), "Принят");
        assert_eq!(OrderStatus::PendingCancel.as_str(), "Ожидает отмены");
        assert_eq!(OrderStatus::AwaitingRestock.as_str(), "Ожидает поступления");
        assert_eq!(OrderStatus::ALL.len(), 8);
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unit_wire_strings() {
        assert_eq!(Unit::Piece.as_str(), "Штука");
        assert_eq!(Unit::Millilitre.as_str(), "Миллилитр");
        assert_eq!("Упаковка".parse::<Unit>().unwrap(), Unit::Pack);
        assert!("шт.".parse::<Unit>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_strings() {
        let json = serde_json::to_string(&OrderStatus::Refund).unwrap();
        assert_eq!(json, "\"Возврат\"");
        let back: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderStatus::Refund);

        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Currency::RUR).unwrap(), "\"RUR\"");
        assert_eq!(
            serde_json::to_string(&Unit::Kilogram).unwrap(),
            "\"Килограмм\""
        );
    }
}
