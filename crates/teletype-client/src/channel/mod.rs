//! Channel client: connection lifecycle, command dispatch and rendering.
//!
//! All work happens on one event loop. Link events, reconnect timers and
//! input events are queued on a single unbounded channel and handled one at
//! a time by `ChannelClient::handle`.

mod client;
mod event;

pub use client::{ChannelClient, LinkState, Submit};
pub use event::{ClientEvent, Flow, InputEvent};
