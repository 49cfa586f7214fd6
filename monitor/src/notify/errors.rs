use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    /// The relay refused the login; retrying will not help until the
    /// credential is fixed.
    #[error("mail relay rejected the sender credential: {0}")]
    Authentication(String),

    /// Connection, TLS, timeout or submission failure; the next run may succeed.
    #[error("mail delivery failed: {0}")]
    Delivery(String),

    #[error("could not build alert email: {0}")]
    Message(String),
}
