use std::fmt;

use lettre::message::Mailbox;

use crate::error::ConfigError;

pub const DEFAULT_PRODUCT_ID: &str = "0242469b-dc1c-11f0-a1d3-0636a7656735";
pub const DEFAULT_PRODUCT_NAME: &str = "Flipkart E-Gift Voucher INR 10000";
pub const DEFAULT_API_ENDPOINT: &str = "https://store.oneplay.in/api/v1/content/details";
pub const DEFAULT_PRODUCT_PAGE_URL: &str =
    "https://store.oneplay.in/view/flipkart-e-gift-voucher-inr-10000-0242469b-dc1c-11f0-a1d3-0636a7656735";
pub const DEFAULT_TARGET_DISCOUNT: f64 = 2.0;
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// A credential that never shows up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(v: impl Into<String>) -> Self {
        Self(v.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SmtpSettings {
    /// Relay host; the connection uses implicit TLS (SMTPS).
    pub host: String,
    pub port: u16,
}

/// Everything a single run needs. Built once at startup, then only borrowed.
#[derive(Clone, Debug)]
pub struct RunConfig {
    // =========================
    // Target
    // =========================
    /// Content id the commerce API knows the product by.
    pub target_identifier: String,

    /// Name used in the alert when the API response carries none.
    pub product_name: String,

    /// JSON endpoint that returns pricing for `target_identifier`.
    pub api_endpoint: String,

    /// Store page linked from the alert email.
    pub product_page_url: String,

    /// Minimum discount percentage that triggers an alert (inclusive).
    pub target_discount: f64,

    // =========================
    // Mail
    // =========================
    pub sender_email: String,
    pub receiver_email: String,
    pub sender_credential: Secret,
    pub smtp: SmtpSettings,
}

impl RunConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let target_discount = match get("MONITOR_TARGET_DISCOUNT") {
            Some(raw) => parse_threshold("MONITOR_TARGET_DISCOUNT", &raw)?,
            None => DEFAULT_TARGET_DISCOUNT,
        };

        let port = match get("SMTP_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "SMTP_PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            target_identifier: get("MONITOR_PRODUCT_ID")
                .unwrap_or_else(|| DEFAULT_PRODUCT_ID.to_string()),
            product_name: get("MONITOR_PRODUCT_NAME")
                .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
            api_endpoint: get("MONITOR_API_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
            product_page_url: get("MONITOR_PRODUCT_PAGE_URL")
                .unwrap_or_else(|| DEFAULT_PRODUCT_PAGE_URL.to_string()),
            target_discount,

            sender_email: parse_address("SENDER_EMAIL", required("SENDER_EMAIL")?)?,
            receiver_email: parse_address("RECEIVER_EMAIL", required("RECEIVER_EMAIL")?)?,
            sender_credential: Secret::new(required("EMAIL_PASSWORD")?),
            smtp: SmtpSettings {
                host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                port,
            },
        })
    }
}

/// Rejects addresses the mail builder would refuse, so a typo fails the run
/// at startup rather than when the first alert is due.
fn parse_address(var: &'static str, raw: String) -> Result<String, ConfigError> {
    match raw.parse::<Mailbox>() {
        Ok(_) => Ok(raw),
        Err(e) => Err(ConfigError::Invalid {
            var,
            reason: format!("'{raw}' is not an email address: {e}"),
        }),
    }
}

fn parse_threshold(var: &'static str, raw: &str) -> Result<f64, ConfigError> {
    let value: f64 = raw.parse().map_err(|_| ConfigError::Invalid {
        var,
        reason: format!("'{raw}' is not a number"),
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid {
            var,
            reason: format!("{value} must be a finite, non-negative percentage"),
        });
    }

    Ok(value)
}
