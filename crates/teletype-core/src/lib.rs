//! TeleType core: transport-agnostic wire contracts and error types.
//!
//! This crate defines the chat envelope, the slash-command grammar and the
//! error surface shared by the client library and its binary. It carries no
//! transport or runtime dependencies so the contracts can be tested and
//! reused on their own.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed frames and input surface as `TeletypeError`/`Result` so a bad
//! server message never takes the client down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{Result, TeletypeError};
