//! Side-effecting services around the data model.
//!
//! - [`mailer`] - Outbound transactional mail (trait seam + HTTP client)
//! - [`verification`] - Account email-verification tokens and dispatch

pub mod mailer;
pub mod verification;

pub use mailer::{HttpMailer, MailError, MailMessage, Mailer, MemoryMailer};
pub use verification::{TokenGenerator, VerificationService};
