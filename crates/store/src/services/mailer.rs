//! Outbound transactional mail.
//!
//! The mail transport is environment configuration, external to the data
//! model, so it sits behind the [`Mailer`] trait: production wires in
//! [`HttpMailer`] against a transactional-mail HTTP API, tests wire in
//! [`MemoryMailer`]. Delivery is best-effort, at-most-once: a transport
//! failure is returned to the caller, never retried, never swallowed.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use lavka_core::Email;

use crate::config::MailConfig;

/// Errors that can occur when dispatching mail.
#[derive(Debug, Error)]
pub enum MailError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Mail API returned an error response.
    #[error("mail API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
    },

    /// Transport unavailable.
    #[error("mail transport unavailable: {0}")]
    Transport(String),
}

/// One outbound message.
#[derive(Debug, Clone)]
pub struct MailMessage {
    /// Recipient address (the account's registered email).
    pub to: Email,
    /// Sender address, from configuration.
    pub from: String,
    pub subject: String,
    pub body: String,
}

/// Mail dispatch seam.
pub trait Mailer {
    /// Dispatch one message, synchronously relative to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the transport is unavailable or the API
    /// rejects the message.
    fn send(
        &self,
        message: &MailMessage,
    ) -> impl Future<Output = Result<(), MailError>> + Send;
}

/// HTTP client for a transactional-mail API.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
}

impl HttpMailer {
    /// Create a new mail API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", auth_header(&config.api_key)?);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }
}

/// Bearer-auth header for the mail API, marked sensitive so the key never
/// shows up in header debug output.
fn auth_header(api_key: &SecretString) -> Result<HeaderValue, MailError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
        .map_err(|e| MailError::Transport(format!("invalid API key format: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

impl Mailer for HttpMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let body = serde_json::json!({
            "from": message.from,
            "to": [message.to.as_str()],
            "subject": message.subject,
            "text": message.body,
        });

        let response = self.client.post(&self.api_url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(to = %message.to, subject = %message.subject, "mail dispatched");
        Ok(())
    }
}

/// In-memory mailer for tests: records every message and can simulate a
/// transport outage.
#[derive(Debug, Default)]
pub struct MemoryMailer {
    sent: std::sync::Mutex<Vec<MailMessage>>,
    fail: std::sync::atomic::AtomicBool,
}

impl MemoryMailer {
    /// Create a new in-memory mailer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `send` fail with a transport error.
    pub fn set_failing(&self, failing: bool) {
        self.fail
            .store(failing, std::sync::atomic::Ordering::SeqCst);
    }

    /// Messages recorded so far, in dispatch order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent
            .lock()
            .expect("mailer lock poisoned")
            .clone()
    }
}

impl Mailer for MemoryMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(MailError::Transport("simulated outage".to_owned()));
        }
        self.sent
            .lock()
            .map_err(|_| MailError::Transport("mailer lock poisoned".to_owned()))?
            .push(message.clone());
        Ok(())
    }
}
