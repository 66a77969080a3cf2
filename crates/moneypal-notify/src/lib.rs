//! Email delivery for the alert pipeline.
//!
//! The pipeline talks to a [`MailTransport`]; the production implementation
//! is [`smtp::SmtpMailer`] over an async SMTP connection. Subject and body
//! rendering lives in [`template`] so tests can assert on wording without a
//! transport.

pub mod error;
pub mod smtp;
pub mod template;

#[cfg(test)]
mod tests;

pub use error::{NotifyError, Result};

use async_trait::async_trait;

/// A mail delivery backend.
///
/// Implementations either deliver the message or return an error; partial
/// success does not exist at this level. The pipeline treats an error as a
/// transport outage and aborts the running pass.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Delivers a plain-text message to a single recipient.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;

    /// Name of the transport (e.g. `"smtp"`), for logging.
    fn transport_name(&self) -> &str;
}
