//! Streaming delivery over a single persistent WebSocket connection.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use logbook_store::LogRecord;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::debug;

use crate::Diagnostics;

/// Connects to the collector and writes one JSON text frame per record.
///
/// Connection state transitions surface through `Diagnostics`. A connect
/// failure or a broken socket ends the task; records sent afterwards are
/// dropped by the closed channel, never queued or retried.
pub(crate) async fn run(
    url: String,
    mut rx: mpsc::UnboundedReceiver<LogRecord>,
    diagnostics: Arc<dyn Diagnostics>,
) {
    diagnostics.info(format!("websocket connecting to {url}"));

    let (socket, _response) = match connect_async(&url).await {
        Ok(pair) => pair,
        Err(e) => {
            diagnostics.error(format!("websocket connection failed: {e}"));
            return;
        }
    };
    diagnostics.info("websocket connection established".to_string());

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            record = rx.recv() => match record {
                Some(record) => {
                    let frame = match serde_json::to_string(&record) {
                        Ok(frame) => frame,
                        Err(e) => {
                            diagnostics.error(format!("report serialization failed: {e}"));
                            continue;
                        }
                    };
                    if let Err(e) = sink.send(Message::Text(frame)).await {
                        diagnostics.error(format!("websocket send failed: {e}"));
                        break;
                    }
                    debug!(url = %url, "record reported over websocket");
                }
                None => {
                    // Reporter handle dropped; close the connection.
                    diagnostics.info("websocket closing".to_string());
                    let _ = sink.send(Message::Close(None)).await;
                    diagnostics.info("websocket closed".to_string());
                    break;
                }
            },
            // Drive the read side so close frames and errors are observed.
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => {
                    diagnostics.info("websocket closed by collector".to_string());
                    break;
                }
                Some(Ok(_)) => {
                    // Collector payloads are ignored; the protocol expects
                    // no acknowledgments.
                }
                Some(Err(e)) => {
                    diagnostics.error(format!("websocket error: {e}"));
                    break;
                }
            },
        }
    }
}
