//! Top-level facade crate for TeleType.
//!
//! Re-exports the wire contracts and the channel client so users can depend on a single crate.

pub mod core {
    pub use teletype_core::*;
}

pub mod client {
    pub use teletype_client::*;
}
