use std::process::ExitCode;

use common::logger::init_logger;
use monitor::{
    MonitorError, RunConfig,
    notify::SmtpAlertSender,
    product::ProductClient,
    run_once,
};

async fn run() -> Result<(), MonitorError> {
    let cfg = RunConfig::from_env()?;

    let source = ProductClient::from_config(&cfg)?;
    let notifier = SmtpAlertSender::from_config(&cfg)?;

    let outcome = run_once(&cfg, &source, &notifier).await?;

    tracing::info!(alert_sent = outcome.alert_sent(), "run finished");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let is_production = std::env::var("APP_ENV").unwrap_or_default() == "production";
    init_logger("discount-monitor", is_production);

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind(), exit_code = e.exit_code(), "run failed");
            ExitCode::from(&e)
        }
    }
}
