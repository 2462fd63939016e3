//! TeleType channel client library.
//!
//! This crate wires config, endpoint derivation, session identity, the
//! WebSocket transport and the display surface into the reconnecting
//! channel client. It is consumed by the `teletype` binary (`main.rs`) and by
//! integration tests, which swap in their own transport and surface.

pub mod channel;
pub mod config;
pub mod endpoint;
pub mod input;
pub mod render;
pub mod session;
pub mod transport;

pub use channel::{ChannelClient, ClientEvent, Flow, InputEvent, LinkState, Submit};
pub use endpoint::{Endpoint, PageLocation};
pub use session::SessionIdentity;
