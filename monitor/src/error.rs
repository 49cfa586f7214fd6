use std::process::ExitCode;

use thiserror::Error;

use crate::notify::NotifyError;
use crate::product::FetchError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Every way a run can end other than cleanly.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("notification failed: {0}")]
    Notify(#[from] NotifyError),
}

impl MonitorError {
    /// Process exit status for the scheduler's run history.
    ///
    /// 2 config, 3 fetch, 4 rejected mail credential, 5 any other mail failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            MonitorError::Config(_) => 2,
            MonitorError::Fetch(_) => 3,
            MonitorError::Notify(NotifyError::Authentication(_)) => 4,
            MonitorError::Notify(_) => 5,
        }
    }

    /// Short stable label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            MonitorError::Config(_) => "config",
            MonitorError::Fetch(_) => "fetch",
            MonitorError::Notify(NotifyError::Authentication(_)) => "notify_auth",
            MonitorError::Notify(_) => "notify_delivery",
        }
    }
}

impl From<&MonitorError> for ExitCode {
    fn from(err: &MonitorError) -> Self {
        ExitCode::from(err.exit_code())
    }
}
