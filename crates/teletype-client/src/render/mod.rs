//! Display surface and line formatting.
//!
//! Notices (`SYSTEM`, `JOIN`) render as one line `[HH:MM:SS] content`.
//! Everything else renders as timestamp, sender label and content. The
//! display is append-only and never evicts.

mod terminal;
mod transcript;

use std::fmt;

use chrono::{DateTime, Local, Utc};
use teletype_core::protocol::{CommandInfo, Envelope, MessageType};

pub use terminal::{EditorOutput, TerminalSurface};
pub use transcript::Transcript;

/// Sender label used for locally generated error notices.
pub const SYSTEM_SENDER: &str = "SYSTEM";

/// Something that can show chat lines and the command suggestion overlay.
pub trait Surface: Send {
    /// Append a line at the end and bring it into view.
    fn append(&mut self, line: Line);

    fn show_suggestions(&mut self, items: &[CommandInfo]);

    fn hide_suggestions(&mut self);
}

/// One rendered entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub time: DateTime<Local>,
    pub body: LineBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineBody {
    /// Single styled segment.
    Notice { content: String },
    /// Sender label and content.
    Message {
        kind: MessageType,
        sender: String,
        content: String,
    },
}

impl Line {
    /// Render an envelope, stamping it with `received_at` when the server
    /// did not.
    pub fn from_envelope(env: Envelope, received_at: DateTime<Utc>) -> Self {
        let time = env.timestamp.unwrap_or(received_at).with_timezone(&Local);
        let body = if env.msg_type.is_notice() {
            LineBody::Notice {
                content: env.content,
            }
        } else {
            LineBody::Message {
                kind: env.msg_type,
                sender: env.sender,
                content: env.content,
            }
        };
        Self { time, body }
    }

    /// Local system notice.
    pub fn notice(content: impl Into<String>) -> Self {
        Self {
            time: Local::now(),
            body: LineBody::Notice {
                content: content.into(),
            },
        }
    }

    /// Local error-tagged notice, shown with the `SYSTEM` label.
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            time: Local::now(),
            body: LineBody::Message {
                kind: MessageType::Error,
                sender: SYSTEM_SENDER.to_string(),
                content: content.into(),
            },
        }
    }

    pub fn timestamp(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }

    pub fn content(&self) -> &str {
        match &self.body {
            LineBody::Notice { content } | LineBody::Message { content, .. } => content,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self.body,
            LineBody::Message {
                kind: MessageType::Error,
                ..
            }
        )
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            LineBody::Notice { content } => write!(f, "[{}] {}", self.timestamp(), content),
            LineBody::Message {
                sender, content, ..
            } => write!(f, "[{}] {}: {}", self.timestamp(), sender, content),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn chat_renders_sender_and_content() {
        let env = Envelope::decode(r#"{"type":"CHAT","sender":"S","content":"C"}"#).unwrap();
        let line = Line::from_envelope(env, Utc::now());
        let shown = line.to_string();
        assert!(shown.contains("S: C"), "{shown}");
        assert!(!line.is_error());
    }

    #[test]
    fn join_renders_as_notice_without_sender() {
        let env = Envelope::join("Ann", "lobby");
        let line = Line::from_envelope(env, Utc::now());
        assert!(matches!(line.body, LineBody::Notice { .. }));
        assert!(!line.to_string().contains("Ann"));
        assert!(line.to_string().ends_with("] lobby"));
    }

    #[test]
    fn server_timestamp_wins_over_receipt_time() {
        let stamped = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let mut env = Envelope::chat("S", "r", "C");
        env.timestamp = Some(stamped);
        let line = Line::from_envelope(env, Utc::now());
        assert_eq!(line.time, stamped.with_timezone(&Local));
    }

    #[test]
    fn local_error_notice_is_labelled_system() {
        let line = Line::error("Signal lost. Retrying uplink...");
        assert!(line.is_error());
        assert!(line.to_string().contains("SYSTEM: Signal lost"));
    }
}
