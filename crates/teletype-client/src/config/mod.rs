//! Client config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use teletype_core::error::{Result, TeletypeError};

pub use schema::{ClientConfig, ClientSection};

/// Picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "teletype.yaml";

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| TeletypeError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClientConfig> {
    let cfg: ClientConfig = serde_yaml::from_str(s)
        .map_err(|e| TeletypeError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// An explicit path must exist; otherwise the default file is optional.
pub fn load(path: Option<&str>) -> Result<ClientConfig> {
    match path {
        Some(p) => load_from_file(p),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH),
        None => {
            tracing::debug!("no {DEFAULT_CONFIG_PATH}; using built-in defaults");
            Ok(ClientConfig::default())
        }
    }
}
