//! Session identity: the local user's display name and current room.

use rand::Rng;

use crate::config::ClientSection;
use crate::endpoint::PageLocation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    username: String,
    room: String,
}

impl SessionIdentity {
    pub fn new(username: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            room: room.into(),
        }
    }

    /// Randomized `<prefix><0..999>` username in the configured default room.
    pub fn generated(cfg: &ClientSection) -> Self {
        let n: u32 = rand::thread_rng().gen_range(0..1000);
        Self::new(format!("{}{n}", cfg.username_prefix), cfg.default_room.clone())
    }

    /// Defaults overridden by the page's `room` and `user` query parameters.
    pub fn from_page(page: &PageLocation, cfg: &ClientSection) -> Self {
        let mut ident = Self::generated(cfg);
        ident.apply_overrides(page.query_param("user"), page.query_param("room"));
        ident
    }

    /// Load-time overrides; `None` keeps the current value.
    pub fn apply_overrides(&mut self, username: Option<String>, room: Option<String>) {
        if let Some(u) = username {
            self.username = u;
        }
        if let Some(r) = room {
            self.room = r;
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub(crate) fn set_username(&mut self, username: String) {
        self.username = username;
    }

    pub(crate) fn set_room(&mut self, room: String) {
        self.room = room;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_defaults() {
        let cfg = ClientSection::default();
        let ident = SessionIdentity::generated(&cfg);
        assert_eq!(ident.room(), "general");
        let n: u32 = ident
            .username()
            .strip_prefix("WebUser_")
            .and_then(|s| s.parse().ok())
            .unwrap();
        assert!(n < 1000);
    }

    #[test]
    fn page_query_wins_over_defaults() {
        let page = PageLocation::parse(Some("https://h/?room=lobby&user=Ann")).unwrap();
        let ident = SessionIdentity::from_page(&page, &ClientSection::default());
        assert_eq!(ident, SessionIdentity::new("Ann", "lobby"));
    }

    #[test]
    fn partial_overrides() {
        let mut ident = SessionIdentity::new("Ann", "lobby");
        ident.apply_overrides(None, Some("ops".into()));
        assert_eq!(ident, SessionIdentity::new("Ann", "ops"));
    }
}
