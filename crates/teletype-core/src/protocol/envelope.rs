//! Chat envelope (JSON text frame).
//!
//! Decoding is lenient: the server omits empty fields, so every field except
//! the payload shape itself has a default. Encoding never carries a
//! timestamp; the server stamps messages on arrival.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, TeletypeError};

/// Envelope kind (field name is `type` in JSON).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    Join,
    Name,
    #[default]
    Chat,
    System,
    Error,
    Leave,
    /// Any type string this client does not know.
    #[serde(other)]
    Unknown,
}

impl MessageType {
    /// Notices render as a single line without a sender label.
    pub fn is_notice(self) -> bool {
        matches!(self, MessageType::System | MessageType::Join)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Join => "JOIN",
            MessageType::Name => "NAME",
            MessageType::Chat => "CHAT",
            MessageType::System => "SYSTEM",
            MessageType::Error => "ERROR",
            MessageType::Leave => "LEAVE",
            MessageType::Unknown => "UNKNOWN",
        }
    }
}

/// The unit of communication between client and server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type", default)]
    pub msg_type: MessageType,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub room: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_timestamp"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Envelope {
    fn outbound(msg_type: MessageType, content: &str, sender: &str, room: &str) -> Self {
        Self {
            msg_type,
            content: content.to_owned(),
            sender: sender.to_owned(),
            room: room.to_owned(),
            timestamp: None,
        }
    }

    /// JOIN announcing `sender` in `room` (content is the room name).
    pub fn join(sender: &str, room: &str) -> Self {
        Self::outbound(MessageType::Join, room, sender, room)
    }

    /// NAME announcing a new username (content is the new name).
    pub fn name(new_name: &str, room: &str) -> Self {
        Self::outbound(MessageType::Name, new_name, new_name, room)
    }

    pub fn chat(sender: &str, room: &str, text: &str) -> Self {
        Self::outbound(MessageType::Chat, text, sender, room)
    }

    /// Decode one inbound text frame.
    pub fn decode(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| TeletypeError::Decode(format!("invalid envelope json: {e}")))
    }

    /// Encode for an outbound text frame.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| TeletypeError::Internal(format!("envelope encode failed: {e}")))
    }
}

/// Accepts RFC 3339 strings and epoch-millisecond numbers. Anything else,
/// including the zero time Go emits for an unset field, becomes `None`.
fn lenient_timestamp<'de, D>(de: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(de)?;
    let ts = match raw {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };
    Ok(ts.filter(|dt| dt.year() > 1))
}
