//! Request/response delivery: one POST per record.

use std::sync::Arc;

use logbook_store::LogRecord;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::reporter::ReportConfig;
use crate::Diagnostics;

/// Posts each incoming record to the collector.
///
/// Every record gets its own spawned request, so completion order across
/// records is not guaranteed. Failures surface once through `Diagnostics`
/// and are never retried.
pub(crate) async fn run(
    config: ReportConfig,
    mut rx: mpsc::UnboundedReceiver<LogRecord>,
    diagnostics: Arc<dyn Diagnostics>,
) {
    let client = reqwest::Client::new();
    let config = Arc::new(config);

    while let Some(record) = rx.recv().await {
        let client = client.clone();
        let config = Arc::clone(&config);
        let diagnostics = Arc::clone(&diagnostics);
        tokio::spawn(async move {
            if let Err(e) = deliver(&client, &config, &record).await {
                diagnostics.error(format!("log report failed: {e}"));
            }
        });
    }
}

/// Issues one POST for one record. Success is status 200 exactly.
pub(crate) async fn deliver(
    client: &reqwest::Client,
    config: &ReportConfig,
    record: &LogRecord,
) -> Result<()> {
    let body = serde_json::to_string(record)?;

    let mut request = client
        .post(&config.url)
        .header(reqwest::header::CONTENT_TYPE, "application/json;charset=UTF-8")
        .body(body);
    if !config.token_key.is_empty() && !config.token_value.is_empty() {
        request = request.header(config.token_key.as_str(), config.token_value.as_str());
    }

    let response = request.send().await.map_err(|e| ReportError::Delivery {
        status: None,
        reason: e.to_string(),
    })?;

    let status = response.status();
    if status.as_u16() == 200 {
        debug!(url = %config.url, "record reported over http");
        Ok(())
    } else {
        Err(ReportError::Delivery {
            status: Some(status.as_u16()),
            reason: format!("collector returned {status}"),
        })
    }
}
