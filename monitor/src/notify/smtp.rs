use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, instrument};

use crate::config::RunConfig;
use crate::notify::errors::NotifyError;
use crate::notify::message::AlertMessage;
use crate::notify::AlertSender;

pub const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Submits alerts through an SMTPS relay with LOGIN/PLAIN authentication.
pub struct SmtpAlertSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpAlertSender {
    pub fn from_config(cfg: &RunConfig) -> Result<Self, NotifyError> {
        let from = parse_mailbox("sender", &cfg.sender_email)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.smtp.host)
            .map_err(|e| NotifyError::Delivery(format!("relay {}: {e}", cfg.smtp.host)))?
            .port(cfg.smtp.port)
            .credentials(Credentials::new(
                cfg.sender_email.clone(),
                cfg.sender_credential.expose().to_string(),
            ))
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(Self::with_transport(transport, from))
    }

    /// Uses an already configured transport, e.g. a plaintext relay on a
    /// private network.
    pub fn with_transport(transport: AsyncSmtpTransport<Tokio1Executor>, from: Mailbox) -> Self {
        Self { transport, from }
    }
}

#[async_trait]
impl AlertSender for SmtpAlertSender {
    #[instrument(skip(self, alert), fields(recipient = %alert.recipient))]
    async fn send_alert(&self, alert: &AlertMessage) -> Result<(), NotifyError> {
        let email = build_email(self.from.clone(), alert)?;

        let response = self.transport.send(email).await.map_err(classify)?;

        debug!(code = %response.code(), "relay accepted message");
        Ok(())
    }
}

/// `multipart/alternative` message with the plain-text part first.
pub fn build_email(from: Mailbox, alert: &AlertMessage) -> Result<Message, NotifyError> {
    let to = parse_mailbox("recipient", &alert.recipient)?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(alert.subject.clone())
        .multipart(MultiPart::alternative_plain_html(
            alert.text_body.clone(),
            alert.html_body.clone(),
        ))
        .map_err(|e| NotifyError::Message(e.to_string()))
}

pub fn parse_mailbox(role: &str, address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| NotifyError::Message(format!("invalid {role} address '{address}': {e}")))
}

fn classify(err: lettre::transport::smtp::Error) -> NotifyError {
    let rejected_login = err
        .status()
        .is_some_and(|code| is_auth_rejection(&code.to_string()));

    if rejected_login {
        NotifyError::Authentication(err.to_string())
    } else {
        NotifyError::Delivery(err.to_string())
    }
}

/// SMTP replies that mean "your credential is wrong or not allowed":
/// 530 auth required, 534 mechanism too weak / app password needed,
/// 535 credentials invalid, 538 encryption required for the mechanism.
pub fn is_auth_rejection(code: &str) -> bool {
    matches!(code, "530" | "534" | "535" | "538")
}
