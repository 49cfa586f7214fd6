pub mod errors;
pub mod message;
pub mod smtp;

use async_trait::async_trait;

pub use errors::NotifyError;
pub use message::AlertMessage;
pub use smtp::SmtpAlertSender;

/// Delivery channel for a composed alert. One call is one submission attempt.
#[async_trait]
pub trait AlertSender: Send + Sync {
    async fn send_alert(&self, alert: &AlertMessage) -> Result<(), NotifyError>;
}
