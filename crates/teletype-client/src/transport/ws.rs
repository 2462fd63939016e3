//! WebSocket link task.
//!
//! Responsibilities:
//! - Dial the endpoint (ws:// or wss://)
//! - Report Opened / Error / Frame / Closed to the channel client
//! - Write queued outbound frames
//!
//! A failed handshake reports `Error` followed by `Closed`, so the client's
//! reconnect loop covers both "never connected" and "connection lost".

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::Instrument;
use url::Url;

use super::codec::{classify, Inbound};
use super::{Connection, LinkEvent, LinkSink, Transport};

/// Production transport backed by tokio-tungstenite.
#[derive(Debug, Default)]
pub struct WsTransport;

impl WsTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for WsTransport {
    fn open(&mut self, endpoint: &Url, sink: LinkSink) -> Connection {
        let (out_tx, out_rx) = mpsc::unbounded_channel::<String>();
        let conn_id = sink.conn_id();
        let span = tracing::info_span!("link", conn_id, endpoint = %endpoint);
        let task = tokio::spawn(run_link(endpoint.clone(), sink, out_rx).instrument(span));
        Connection::new(conn_id, out_tx).with_task(task)
    }
}

async fn run_link(endpoint: Url, sink: LinkSink, mut out_rx: mpsc::UnboundedReceiver<String>) {
    let ws = match tokio_tungstenite::connect_async(endpoint.as_str()).await {
        Ok((ws, _response)) => ws,
        Err(e) => {
            tracing::warn!(error = %e, "websocket connect failed");
            sink.send(LinkEvent::Error(e.to_string()));
            sink.send(LinkEvent::Closed);
            return;
        }
    };

    tracing::info!("websocket open");
    if !sink.send(LinkEvent::Opened) {
        return;
    }

    let (mut ws_tx, mut ws_rx) = ws.split();

    loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                match maybe_out {
                    Some(frame) => {
                        if let Err(e) = ws_tx.send(Message::Text(frame.into())).await {
                            sink.send(LinkEvent::Error(e.to_string()));
                            break;
                        }
                    }
                    None => {
                        // handle dropped: close politely
                        let _ = ws_tx.send(Message::Close(None)).await;
                        break;
                    }
                }
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let Some(incoming) = incoming else { break; };
                let msg = match incoming {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::warn!(error = %e, "websocket read failed");
                        sink.send(LinkEvent::Error(e.to_string()));
                        break;
                    }
                };

                match classify(msg) {
                    Inbound::Text(text) => {
                        if !sink.send(LinkEvent::Frame(text)) {
                            break;
                        }
                    }
                    Inbound::Binary { bytes_len } => {
                        tracing::warn!(bytes_len, "dropping binary frame");
                    }
                    Inbound::Control => {}
                    Inbound::Close => break,
                }
            }
        }
    }

    tracing::info!("websocket closed");
    sink.send(LinkEvent::Closed);
}
