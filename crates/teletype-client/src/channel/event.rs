use crate::transport::LinkEvent;

/// Everything the channel client reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Notification from the link with the given id.
    Link { conn_id: u64, event: LinkEvent },
    /// A scheduled reconnect fired.
    ReconnectDue { timer_id: u64 },
    Input(InputEvent),
}

/// User-side events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The input line now reads this text.
    Changed(String),
    /// The line was submitted.
    Submit(String),
    /// Input source closed.
    Eof,
}

/// Whether the event loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}
