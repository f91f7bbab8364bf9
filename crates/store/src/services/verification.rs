//! Account email-verification tokens.
//!
//! A token is a keyed digest over the account's identifying state (id, email,
//! role, superuser flag) plus an issue timestamp and a random nonce:
//!
//! ```text
//! {timestamp}:{nonce}:{signature}
//! ```
//!
//! The separator stays out of the base64url alphabet, so the parts split
//! unambiguously.
//!
//! Binding the signature to account state means any mutation of the account
//! invalidates outstanding tokens; the timestamp bounds their lifetime; the
//! nonce makes every issued token distinct even within the same second.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::models::Account;

use super::mailer::{MailError, MailMessage, Mailer};

/// Default token lifetime.
const DEFAULT_MAX_AGE_DAYS: i64 = 3;

/// Mail subject used for confirmation codes.
const CONFIRMATION_SUBJECT: &str = "Email Verification";

/// Generates and checks single-use, account-bound verification tokens.
pub struct TokenGenerator {
    secret: SecretString,
    max_age: Duration,
}

impl TokenGenerator {
    /// Create a generator with the default three-day token lifetime.
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            max_age: Duration::days(DEFAULT_MAX_AGE_DAYS),
        }
    }

    /// Override the token lifetime.
    #[must_use]
    pub const fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Issue a fresh token for the account's current state.
    #[must_use]
    pub fn make_token(&self, account: &Account) -> String {
        let timestamp = Utc::now().timestamp();
        let nonce_bytes: [u8; 12] = rand::rng().random();
        let nonce = URL_SAFE_NO_PAD.encode(nonce_bytes);
        let signature = self.signature(account, timestamp, &nonce);
        format!("{timestamp}:{nonce}:{signature}")
    }

    /// Check a token against the account's current state.
    ///
    /// Returns `false` for malformed tokens, signature mismatches (account
    /// state changed since issue, or wrong account entirely), and expired or
    /// future-dated timestamps.
    #[must_use]
    pub fn check_token(&self, account: &Account, token: &str) -> bool {
        self.check_token_at(account, token, Utc::now())
    }

    fn check_token_at(&self, account: &Account, token: &str, now: DateTime<Utc>) -> bool {
        let mut parts = token.splitn(3, ':');
        let (Some(timestamp), Some(nonce), Some(signature)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        let Ok(timestamp) = timestamp.parse::<i64>() else {
            return false;
        };

        let age = now.timestamp() - timestamp;
        if age < 0 || age > self.max_age.num_seconds() {
            return false;
        }

        self.signature(account, timestamp, nonce) == signature
    }

    fn signature(&self, account: &Account, timestamp: i64, nonce: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.expose_secret().as_bytes());
        hasher.update(account.id.as_i64().to_le_bytes());
        hasher.update(account.email.as_str().as_bytes());
        hasher.update(account.role.as_str().as_bytes());
        hasher.update([u8::from(account.is_superuser)]);
        hasher.update(timestamp.to_le_bytes());
        hasher.update(nonce.as_bytes());
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }
}

/// Issues confirmation codes and dispatches them to the account's registered
/// address.
pub struct VerificationService<'a, M> {
    tokens: &'a TokenGenerator,
    mailer: &'a M,
    sender: String,
}

impl<'a, M: Mailer> VerificationService<'a, M> {
    /// Create a new verification service. `sender` is the configured
    /// outbound address.
    pub fn new(tokens: &'a TokenGenerator, mailer: &'a M, sender: impl Into<String>) -> Self {
        Self {
            tokens,
            mailer,
            sender: sender.into(),
        }
    }

    /// Generate a fresh confirmation code for the account and mail it.
    ///
    /// Each call issues a new, distinct token. Delivery is at-most-once: a
    /// transport failure surfaces as [`MailError`] and the code is simply
    /// lost (the caller may invoke this again for a new one).
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the mail transport is unavailable or rejects
    /// the message.
    pub async fn send_confirmation_code(&self, account: &Account) -> Result<(), MailError> {
        let token = self.tokens.make_token(account);
        let message = MailMessage {
            to: account.email.clone(),
            from: self.sender.clone(),
            subject: CONFIRMATION_SUBJECT.to_owned(),
            body: format!("your confirmation code is {token}"),
        };

        tracing::info!(account_id = %account.id, "dispatching confirmation code");
        self.mailer.send(&message).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lavka_core::{AccountId, Email, Role};

    use super::*;

    fn secret() -> SecretString {
        SecretString::from("GxT7dYq2mW9pLc4NvZ8bRe1KsUh6Jf3A")
    }

    fn account() -> Account {
        Account {
            id: AccountId::new(1),
            username: "masha".to_owned(),
            email: Email::parse("masha@example.com").unwrap(),
            country: "Russia".to_owned(),
            city: "Kazan".to_owned(),
            address: "Bauman st. 1".to_owned(),
            phone_number: "+79990001122".to_owned(),
            role: Role::User,
            is_superuser: false,
            date_joined: Utc::now(),
        }
    }

    #[test]
    fn test_fresh_token_checks_out() {
        let tokens = TokenGenerator::new(secret());
        let account = account();
        let token = tokens.make_token(&account);
        assert!(tokens.check_token(&account, &token));
    }

    #[test]
    fn test_two_tokens_are_distinct() {
        let tokens = TokenGenerator::new(secret());
        let account = account();
        assert_ne!(tokens.make_token(&account), tokens.make_token(&account));
    }

    #[test]
    fn test_account_mutation_invalidates_token() {
        let tokens = TokenGenerator::new(secret());
        let mut account = account();
        let token = tokens.make_token(&account);

        account.role = Role::Moderator;
        assert!(!tokens.check_token(&account, &token));

        account.role = Role::User;
        assert!(tokens.check_token(&account, &token));

        account.is_superuser = true;
        assert!(!tokens.check_token(&account, &token));
    }

    #[test]
    fn test_token_is_account_bound() {
        let tokens = TokenGenerator::new(secret());
        let account = account();
        let token = tokens.make_token(&account);

        let mut other = self::account();
        other.id = AccountId::new(2);
        assert!(!tokens.check_token(&other, &token));
    }

    #[test]
    fn test_token_expires() {
        let tokens = TokenGenerator::new(secret()).with_max_age(Duration::hours(1));
        let account = account();
        let token = tokens.make_token(&account);

        assert!(tokens.check_token_at(&account, &token, Utc::now()));
        assert!(!tokens.check_token_at(&account, &token, Utc::now() + Duration::hours(2)));
        // A token "from the future" is rejected too.
        assert!(!tokens.check_token_at(&account, &token, Utc::now() - Duration::hours(1)));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let tokens = TokenGenerator::new(secret());
        let account = account();
        assert!(!tokens.check_token(&account, ""));
        assert!(!tokens.check_token(&account, "not-a-token"));
        assert!(!tokens.check_token(&account, "12345"));
        assert!(!tokens.check_token(&account, "abc:def:ghi"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let account = account();
        let token = TokenGenerator::new(secret()).make_token(&account);
        let other = TokenGenerator::new(SecretString::from("Qw8NzX3vB6mK1tYc9RhL4dPe7SgJ0fUa"));
        assert!(!other.check_token(&account, &token));
    }
}
