//! Frame classification for the link task.
//!
//! - Text frames are forwarded as-is; envelope decoding happens in the
//!   channel client so decode failures are reported in one place.
//! - Binary frames are not part of the protocol and are dropped.
//! - Ping/Pong are answered by tungstenite itself; Close ends the link.

use tokio_tungstenite::tungstenite::Message;

#[derive(Debug, PartialEq, Eq)]
pub enum Inbound {
    Text(String),
    Binary { bytes_len: usize },
    Control,
    Close,
}

pub fn classify(msg: Message) -> Inbound {
    match msg {
        Message::Text(s) => Inbound::Text(s.to_string()),
        Message::Binary(b) => Inbound::Binary { bytes_len: b.len() },
        Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => Inbound::Control,
        Message::Close(_) => Inbound::Close,
    }
}
