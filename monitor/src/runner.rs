//! One scheduled run, start to finish.
//!
//! START → FETCH → EVALUATE → (NOTIFY) → END
//!
//! Every branch ends the run; nothing is retried here. The external
//! scheduler supplies repetition by invoking a fresh process, and nothing is
//! remembered between runs, so a discount that stays above target alerts on
//! every run.

use common::logger::{TraceId, annotate_span, child_span, root_span};
use tracing::{Instrument, error, info};

use crate::config::RunConfig;
use crate::error::MonitorError;
use crate::evaluator::{Evaluation, evaluate};
use crate::notify::{AlertMessage, AlertSender};
use crate::product::{ProductSnapshot, ProductSource};

/// How a clean run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    ThresholdNotMet {
        snapshot: ProductSnapshot,
        evaluation: Evaluation,
    },
    AlertSent {
        snapshot: ProductSnapshot,
        evaluation: Evaluation,
        alert: AlertMessage,
    },
}

impl RunOutcome {
    pub fn alert_sent(&self) -> bool {
        matches!(self, RunOutcome::AlertSent { .. })
    }
}

pub async fn run_once<S, N>(
    cfg: &RunConfig,
    source: &S,
    notifier: &N,
) -> Result<RunOutcome, MonitorError>
where
    S: ProductSource + ?Sized,
    N: AlertSender + ?Sized,
{
    let trace_id = TraceId::default();
    let span = root_span("discount_check", &trace_id);

    async move {
        annotate_span(&cfg.target_identifier);
        info!(
            product_id = %cfg.target_identifier,
            target_discount = cfg.target_discount,
            "discount monitor run started"
        );

        let snapshot = match source
            .fetch_snapshot(&cfg.target_identifier)
            .instrument(child_span("fetch"))
            .await
        {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, "failed to fetch product data; no alert will be sent");
                return Err(MonitorError::Fetch(e));
            }
        };

        info!(
            product = %snapshot.product_name,
            discount = snapshot.discount_percentage,
            current_price = snapshot.current_price,
            original_price = snapshot.original_price,
            "product data fetched"
        );

        let evaluation = evaluate(snapshot.discount_percentage, cfg.target_discount);

        if !evaluation.met {
            info!(
                discount = evaluation.discount,
                target = evaluation.target,
                shortfall = evaluation.shortfall(),
                "target not reached yet"
            );
            return Ok(RunOutcome::ThresholdNotMet {
                snapshot,
                evaluation,
            });
        }

        info!(
            discount = evaluation.discount,
            target = evaluation.target,
            "target discount reached; sending alert"
        );

        let alert = AlertMessage::compose(&snapshot, cfg);

        if let Err(e) = notifier
            .send_alert(&alert)
            .instrument(child_span("notify"))
            .await
        {
            let err = MonitorError::Notify(e);
            error!(error = %err, kind = err.kind(), "alert email was not delivered");
            return Err(err);
        }

        info!(recipient = %alert.recipient, "alert email sent");

        Ok(RunOutcome::AlertSent {
            snapshot,
            evaluation,
            alert,
        })
    }
    .instrument(span)
    .await
}
