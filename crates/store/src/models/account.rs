//! Account domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use lavka_core::{AccountId, Email, Role};

use super::{ValidationError, required};

/// A registered storefront account.
///
/// The role predicates below are computed from stored state on every call and
/// are never persisted, so the role column and the superuser flag cannot
/// drift apart from a cached boolean.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// Login name, unique across the store.
    pub username: String,
    /// Registered email address; the verification flow mails this.
    pub email: Email,
    pub country: String,
    pub city: String,
    pub address: String,
    pub phone_number: String,
    /// Role flag, defaults to [`Role::User`].
    pub role: Role,
    /// Superuser-equivalent flag carried over from the account backend.
    pub is_superuser: bool,
    /// When the account was created. Set once at insert, never mutated.
    pub date_joined: DateTime<Utc>,
}

impl Account {
    /// True if the account is a superuser or carries the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_superuser || self.role == Role::Admin
    }

    /// True if the account carries the moderator role.
    #[must_use]
    pub fn is_moderator(&self) -> bool {
        self.role == Role::Moderator
    }

    /// True if the account carries the plain user role.
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Validated input for creating an [`Account`].
///
/// All contact fields are required; the constructor is the only way to build
/// one, so an empty required field can never reach the repository.
#[derive(Debug, Clone)]
pub struct NewAccount {
    username: String,
    email: Email,
    country: String,
    city: String,
    address: String,
    phone_number: String,
}

impl NewAccount {
    /// Validate the required account fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] if any required field is empty.
    pub fn new(
        username: impl Into<String>,
        email: Email,
        country: impl Into<String>,
        city: impl Into<String>,
        address: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: required("username", username.into())?,
            email,
            country: required("country", country.into())?,
            city: required("city", city.into())?,
            address: required("address", address.into())?,
            phone_number: required("phone_number", phone_number.into())?,
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }
}

/// Validated username for renaming an existing account.
#[derive(Debug, Clone)]
pub struct Username(String);

impl Username {
    /// Validate the username.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] if the username is empty.
    pub fn new(username: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self(required("username", username.into())?))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated contact-field update for an existing account.
#[derive(Debug, Clone)]
pub struct ContactUpdate {
    country: String,
    city: String,
    address: String,
    phone_number: String,
}

impl ContactUpdate {
    /// Validate the contact fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] if any field is empty.
    pub fn new(
        country: impl Into<String>,
        city: impl Into<String>,
        address: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            country: required("country", country.into())?,
            city: required("city", city.into())?,
            address: required("address", address.into())?,
            phone_number: required("phone_number", phone_number.into())?,
        })
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn account_with(role: Role, is_superuser: bool) -> Account {
        Account {
            id: AccountId::new(1),
            username: "masha".to_owned(),
            email: Email::parse("masha@example.com").unwrap(),
            country: "Russia".to_owned(),
            city: "Kazan".to_owned(),
            address: "Bauman st. 1".to_owned(),
            phone_number: "+79990001122".to_owned(),
            role,
            is_superuser,
            date_joined: Utc::now(),
        }
    }

    #[test]
    fn test_is_admin_all_four_combinations() {
        assert!(!account_with(Role::User, false).is_admin());
        assert!(account_with(Role::User, true).is_admin());
        assert!(account_with(Role::Admin, false).is_admin());
        assert!(account_with(Role::Admin, true).is_admin());
    }

    #[test]
    fn test_role_predicates_are_exclusive_of_role() {
        let moderator = account_with(Role::Moderator, false);
        assert!(moderator.is_moderator());
        assert!(!moderator.is_user());
        assert!(!moderator.is_admin());

        let user = account_with(Role::User, false);
        assert!(user.is_user());
        assert!(!user.is_moderator());
    }

    #[test]
    fn test_new_account_requires_contact_fields() {
        let email = Email::parse("masha@example.com").unwrap();
        let err = NewAccount::new("masha", email.clone(), "", "Kazan", "Bauman st. 1", "+7999")
            .unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField("country")));

        let ok = NewAccount::new("masha", email, "Russia", "Kazan", "Bauman st. 1", "+7999");
        assert!(ok.is_ok());
    }
}
