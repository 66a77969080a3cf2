use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;

use crate::error::{NotifyError, Result};
use crate::MailTransport;

/// SMTP connection settings, usually deserialized from the server's
/// `[mail]` config table.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Sender address, e.g. `"MoneyPal <alerts@moneypal.app>"`.
    pub from: String,
}

fn default_smtp_port() -> u16 {
    465
}

/// Production mail transport over async SMTP.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds the transport from config.
    ///
    /// Both credentials must be present or construction fails with
    /// [`NotifyError::InvalidConfig`]. Port 587 uses STARTTLS; anything
    /// else uses implicit TLS.
    pub fn new(config: &MailConfig) -> Result<Self> {
        let (username, password) = match (&config.username, &config.password) {
            (Some(u), Some(p)) => (u.clone(), p.clone()),
            _ => {
                return Err(NotifyError::InvalidConfig(
                    "smtp username and password are both required".to_string(),
                ))
            }
        };

        let from: Mailbox = config.from.parse()?;

        let builder = if config.smtp_port == 587 {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        };
        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(username, password))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.transport.send(message).await?;
        tracing::info!(to = %to, subject = %subject, "email sent");
        Ok(())
    }

    fn transport_name(&self) -> &str {
        "smtp"
    }
}
