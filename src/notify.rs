use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;
use crate::error::Result;

/// Login for the SMTP relay, also used as the sender address
#[derive(Clone)]
pub struct MailCredentials {
    pub sender: String,
    password: String,
}

impl MailCredentials {
    pub fn new(sender: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            password: password.into(),
        }
    }

    /// Read `SENDER_EMAIL` and `SENDER_PASSWORD`; both must be set and non-empty
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the credentials through `get` instead of the process environment
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let sender = get("SENDER_EMAIL").filter(|v| !v.is_empty())?;
        let password = get("SENDER_PASSWORD").filter(|v| !v.is_empty())?;
        Some(Self::new(sender, password))
    }
}

impl std::fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailCredentials")
            .field("sender", &self.sender)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outcome of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No credentials, nothing was sent
    Skipped,
}

/// Sends the report by email through an SMTP relay
#[derive(Debug, Clone)]
pub struct Notifier {
    relay: MailConfig,
    credentials: Option<MailCredentials>,
}

impl Notifier {
    pub fn new(relay: MailConfig, credentials: Option<MailCredentials>) -> Self {
        Self { relay, credentials }
    }

    /// Relay from config plus `SMTP_HOST`/`SMTP_PORT`, credentials from the environment
    pub fn from_env(relay: MailConfig) -> Self {
        Self::new(relay.with_env_overrides(), MailCredentials::from_env())
    }

    /// Same as `from_env`, reading variables through `get`
    pub fn from_lookup(relay: MailConfig, get: impl Fn(&str) -> Option<String>) -> Self {
        let credentials = MailCredentials::from_lookup(&get);
        Self::new(relay.with_overrides(get), credentials)
    }

    /// Deliver one email. Without credentials this does nothing and returns
    /// `Delivery::Skipped`; transport failures are returned as errors.
    pub async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<Delivery> {
        let Some(credentials) = &self.credentials else {
            ::log::warn!("Email not sent! Set SENDER_EMAIL and SENDER_PASSWORD");
            return Ok(Delivery::Skipped);
        };

        let message = build_message(&credentials.sender, recipient, subject, body)?;

        ::log::info!(
            "Sending email to {} via {}:{}",
            recipient,
            self.relay.host,
            self.relay.port
        );
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.relay.host)?
            .port(self.relay.port)
            .credentials(Credentials::new(
                credentials.sender.clone(),
                credentials.password.clone(),
            ))
            .build();

        transport.send(message).await?;
        ::log::info!("Email sent to {}", recipient);
        Ok(Delivery::Sent)
    }
}

/// Build a plain text message
pub fn build_message(sender: &str, recipient: &str, subject: &str, body: &str) -> Result<Message> {
    let message = Message::builder()
        .from(sender.parse()?)
        .to(recipient.parse()?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())?;
    Ok(message)
}
