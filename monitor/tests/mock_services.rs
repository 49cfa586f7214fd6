use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use monitor::config::{RunConfig, Secret, SmtpSettings};
use monitor::notify::{AlertMessage, AlertSender, NotifyError};
use monitor::product::{FetchError, ProductSnapshot, ProductSource};

type FetchFn = Box<dyn Fn() -> Result<ProductSnapshot, FetchError> + Send + Sync>;
type SendFn = Box<dyn Fn() -> Result<(), NotifyError> + Send + Sync>;

/// Product source answering every call with the same scripted result.
pub struct ScriptedSource {
    respond: FetchFn,
    pub calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn with_discount(discount: f64) -> Self {
        Self::new(move || Ok(snapshot(discount)))
    }

    pub fn failing(make_err: fn() -> FetchError) -> Self {
        Self::new(move || Err(make_err()))
    }

    fn new(f: impl Fn() -> Result<ProductSnapshot, FetchError> + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(f),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductSource for ScriptedSource {
    async fn fetch_snapshot(&self, _product_id: &str) -> Result<ProductSnapshot, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)()
    }
}

/// Records every alert it is asked to send.
pub struct RecordingSender {
    respond: SendFn,
    pub sent: Mutex<Vec<AlertMessage>>,
}

impl RecordingSender {
    pub fn accepting() -> Self {
        Self {
            respond: Box::new(|| Ok(())),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(make_err: fn() -> NotifyError) -> Self {
        Self {
            respond: Box::new(move || Err(make_err())),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub async fn attempts(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl AlertSender for RecordingSender {
    async fn send_alert(&self, alert: &AlertMessage) -> Result<(), NotifyError> {
        self.sent.lock().await.push(alert.clone());
        (self.respond)()
    }
}

pub fn snapshot(discount: f64) -> ProductSnapshot {
    ProductSnapshot {
        product_name: "Flipkart E-Gift Voucher INR 10000".into(),
        current_price: 10_000.0 * (1.0 - discount / 100.0),
        original_price: 10_000.0,
        discount_percentage: discount,
    }
}

pub fn config(target_discount: f64) -> RunConfig {
    RunConfig {
        target_identifier: "voucher-10000".into(),
        product_name: "Flipkart E-Gift Voucher INR 10000".into(),
        api_endpoint: "http://127.0.0.1:9/api".into(),
        product_page_url: "https://store.example.com/view/voucher-10000".into(),
        target_discount,
        sender_email: "alerts@example.com".into(),
        receiver_email: "me@example.com".into(),
        sender_credential: Secret::new("app-password"),
        smtp: SmtpSettings {
            host: "smtp.example.com".into(),
            port: 465,
        },
    }
}
