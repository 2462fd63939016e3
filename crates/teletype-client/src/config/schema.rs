use std::time::Duration;

use serde::Deserialize;
use teletype_core::error::{Result, TeletypeError};
use url::Url;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub client: ClientSection,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            client: ClientSection::default(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TeletypeError::UnsupportedVersion);
        }

        self.client.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// Endpoint used when the page location has no network origin.
    #[serde(default = "default_fallback_endpoint")]
    pub fallback_endpoint: String,

    #[serde(default = "default_ws_path")]
    pub ws_path: String,

    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,

    #[serde(default = "default_room")]
    pub default_room: String,

    #[serde(default = "default_username_prefix")]
    pub username_prefix: String,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            fallback_endpoint: default_fallback_endpoint(),
            ws_path: default_ws_path(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
            default_room: default_room(),
            username_prefix: default_username_prefix(),
        }
    }
}

impl ClientSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=600_000).contains(&self.reconnect_delay_ms) {
            return Err(TeletypeError::Config(
                "client.reconnect_delay_ms must be between 100 and 600000".into(),
            ));
        }
        self.fallback_url()?;
        if !self.ws_path.starts_with('/') {
            return Err(TeletypeError::Config(
                "client.ws_path must start with '/'".into(),
            ));
        }
        if self.default_room.trim().is_empty() {
            return Err(TeletypeError::Config(
                "client.default_room must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    pub fn fallback_url(&self) -> Result<Url> {
        let url = Url::parse(&self.fallback_endpoint).map_err(|e| {
            TeletypeError::Config(format!("client.fallback_endpoint is not a url: {e}"))
        })?;
        match url.scheme() {
            "ws" | "wss" => Ok(url),
            other => Err(TeletypeError::Config(format!(
                "client.fallback_endpoint must use ws or wss, got {other}"
            ))),
        }
    }
}

fn default_fallback_endpoint() -> String {
    "ws://localhost:8080/ws".into()
}
fn default_ws_path() -> String {
    "/ws".into()
}
fn default_reconnect_delay_ms() -> u64 {
    3000
}
fn default_room() -> String {
    "general".into()
}
fn default_username_prefix() -> String {
    "WebUser_".into()
}
