//! Page location and endpoint derivation.
//!
//! The page location is the URL the client treats as the page it was loaded
//! from. A network page connects back to its own origin at the configured
//! path; a local page (`file:` or none at all) falls back to the fixed
//! development endpoint.

use teletype_core::error::{Result, TeletypeError};
use url::Url;

use crate::config::ClientSection;

/// Where the client was "loaded" from.
#[derive(Debug, Clone, Default)]
pub struct PageLocation {
    url: Option<Url>,
}

/// Resolved connection target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: Url,
    /// True when the page has no network origin.
    pub local_fallback: bool,
}

impl Endpoint {
    /// `host:port` of the target, for notices.
    pub fn host_port(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port_or_known_default() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }
}

impl PageLocation {
    /// A page with no network origin.
    pub fn local() -> Self {
        Self { url: None }
    }

    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let Some(raw) = raw else {
            return Ok(Self::local());
        };
        let url = Url::parse(raw)
            .map_err(|e| TeletypeError::BadRequest(format!("invalid page url {raw}: {e}")))?;
        Ok(Self { url: Some(url) })
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// First non-empty value of a query parameter.
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.url
            .as_ref()?
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())
    }

    fn network_origin(&self) -> Option<(&'static str, String)> {
        let url = self.url.as_ref()?;
        if url.scheme() == "file" {
            return None;
        }
        let host = url.host_str()?;
        let scheme = match url.scheme() {
            "https" | "wss" => "wss",
            _ => "ws",
        };
        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        Some((scheme, authority))
    }

    /// Derive the endpoint for the next connect attempt.
    pub fn endpoint(&self, cfg: &ClientSection) -> Result<Endpoint> {
        match self.network_origin() {
            Some((scheme, authority)) => {
                let raw = format!("{scheme}://{authority}{}", cfg.ws_path);
                let url = Url::parse(&raw).map_err(|e| {
                    TeletypeError::BadRequest(format!("invalid endpoint {raw}: {e}"))
                })?;
                Ok(Endpoint {
                    url,
                    local_fallback: false,
                })
            }
            None => Ok(Endpoint {
                url: cfg.fallback_url()?,
                local_fallback: true,
            }),
        }
    }
}
