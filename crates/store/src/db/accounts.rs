//! Account repository.
//!
//! All queries use the runtime sqlx API; every unique or referential rule is
//! backed by an index or foreign key in the schema, so violations surface as
//! [`RepositoryError::Conflict`] even under concurrent writers.

use chrono::Utc;
use sqlx::SqlitePool;

use lavka_core::{AccountId, Email, Role};

use super::{RepositoryError, constraint_violation, corrupt_row};
use crate::models::{Account, ContactUpdate, NewAccount, Username};

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new account. Role defaults to `user`, the superuser flag to
    /// false; `date_joined` is set here and never updated afterwards.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewAccount) -> Result<Account, RepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            "INSERT INTO account \
                 (username, email, country, city, address, phone_number, role, is_superuser, date_joined) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING id, username, email, country, city, address, phone_number, role, \
                       is_superuser, date_joined",
        )
        .bind(new.username())
        .bind(new.email())
        .bind(new.country())
        .bind(new.city())
        .bind(new.address())
        .bind(new.phone_number())
        .bind(Role::User)
        .bind(false)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(constraint_violation("username already exists"))?;

        tracing::debug!(account_id = %account.id, username = %account.username, "account created");
        Ok(account)
    }

    /// Get an account by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, email, country, city, address, phone_number, role, \
                    is_superuser, date_joined \
             FROM account WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(corrupt_row)?;
        Ok(account)
    }

    /// Get an account by its registered email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, username, email, country, city, address, phone_number, role, \
                    is_superuser, date_joined \
             FROM account WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(corrupt_row)?;
        Ok(account)
    }

    /// List all accounts, username descending (the store's default account
    /// ordering).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Account>, RepositoryError> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT id, username, email, country, city, address, phone_number, role, \
                    is_superuser, date_joined \
             FROM account ORDER BY username DESC",
        )
        .fetch_all(self.pool)
        .await
        .map_err(corrupt_row)?;
        Ok(accounts)
    }

    /// Update an account's contact fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_contact(
        &self,
        id: AccountId,
        contact: &ContactUpdate,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE account SET country = ?, city = ?, address = ?, phone_number = ? WHERE id = ?",
        )
        .bind(contact.country())
        .bind(contact.city())
        .bind(contact.address())
        .bind(contact.phone_number())
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Change an account's registered email address.
    ///
    /// Outstanding verification tokens are implicitly invalidated: the token
    /// signature covers the email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_email(&self, id: AccountId, email: &Email) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE account SET email = ? WHERE id = ?")
            .bind(email)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        tracing::debug!(account_id = %id, "account email updated");
        Ok(())
    }

    /// Rename an account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is already taken.
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_username(
        &self,
        id: AccountId,
        username: &Username,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE account SET username = ? WHERE id = ?")
            .bind(username.as_str())
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(constraint_violation("username already exists"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Set an account's role.
    ///
    /// Outstanding verification tokens are implicitly invalidated: the token
    /// signature covers the role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_role(&self, id: AccountId, role: Role) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE account SET role = ? WHERE id = ?")
            .bind(role)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        tracing::debug!(account_id = %id, role = %role, "account role updated");
        Ok(())
    }

    /// Set or clear an account's superuser flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_superuser(&self, id: AccountId, flag: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE account SET is_superuser = ? WHERE id = ?")
            .bind(flag)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete an account.
    ///
    /// Cascades to the account's orders, cart rows and favorite rows at the
    /// storage level.
    ///
    /// # Returns
    ///
    /// Returns `true` if the account was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: AccountId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM account WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
