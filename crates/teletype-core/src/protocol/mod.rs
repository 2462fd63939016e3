//! Protocol modules (wire envelope + slash commands).
//!
//! - `envelope`: the JSON text frame exchanged with the server.
//! - `command`: the `/`-prefixed input grammar and its static catalog.
//!
//! Decoding is panic-free: malformed input is reported as `TeletypeError`
//! so the client keeps running on hostile or garbled traffic.

pub mod command;
pub mod envelope;

pub use command::{parse_command, suggestions, CommandInfo, SlashCommand, KNOWN_COMMANDS};
pub use envelope::{Envelope, MessageType};
