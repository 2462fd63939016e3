//! Transport layer (WebSocket).
//!
//! A `Transport` opens one link per connect attempt and reports its
//! lifecycle as `LinkEvent`s tagged with the link's id. The channel client
//! owns the returned `Connection` handle; dropping the handle tears the link
//! down.

pub mod codec;
pub mod ws;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use url::Url;

use teletype_core::error::{Result, TeletypeError};

use crate::channel::ClientEvent;

pub use ws::WsTransport;

/// Lifecycle and traffic notifications from one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Opened,
    Error(String),
    /// Emitted exactly once per link, after which it is dead.
    Closed,
    /// One inbound text frame.
    Frame(String),
}

/// Opens links to an endpoint.
pub trait Transport: Send {
    fn open(&mut self, endpoint: &Url, sink: LinkSink) -> Connection;
}

/// Event sender handed to a link; tags every event with the link id.
#[derive(Debug, Clone)]
pub struct LinkSink {
    conn_id: u64,
    tx: mpsc::UnboundedSender<ClientEvent>,
}

impl LinkSink {
    pub(crate) fn new(conn_id: u64, tx: mpsc::UnboundedSender<ClientEvent>) -> Self {
        Self { conn_id, tx }
    }

    pub fn conn_id(&self) -> u64 {
        self.conn_id
    }

    /// Returns false once the client has gone away.
    pub fn send(&self, event: LinkEvent) -> bool {
        self.tx
            .send(ClientEvent::Link {
                conn_id: self.conn_id,
                event,
            })
            .is_ok()
    }
}

/// Owned handle to one link: its outbound frame queue and driving task.
#[derive(Debug)]
pub struct Connection {
    id: u64,
    outbound: mpsc::UnboundedSender<String>,
    task: Option<JoinHandle<()>>,
}

impl Connection {
    pub fn new(id: u64, outbound: mpsc::UnboundedSender<String>) -> Self {
        Self {
            id,
            outbound,
            task: None,
        }
    }

    pub fn with_task(mut self, task: JoinHandle<()>) -> Self {
        self.task = Some(task);
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn send(&self, frame: String) -> Result<()> {
        self.outbound
            .send(frame)
            .map_err(|_| TeletypeError::Transport("outbound queue closed".into()))
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
