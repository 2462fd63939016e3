use teletype_core::protocol::CommandInfo;

use super::{Line, Surface};

/// In-memory display. Keeps every line and the current overlay state.
#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<Line>,
    suggestions: Option<Vec<CommandInfo>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn last(&self) -> Option<&Line> {
        self.lines.last()
    }

    /// True if any rendered line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.to_string().contains(needle))
    }

    /// Visible suggestions, `None` while the overlay is hidden.
    pub fn suggestions(&self) -> Option<&[CommandInfo]> {
        self.suggestions.as_deref()
    }
}

impl Surface for Transcript {
    fn append(&mut self, line: Line) {
        self.lines.push(line);
    }

    fn show_suggestions(&mut self, items: &[CommandInfo]) {
        self.suggestions = Some(items.to_vec());
    }

    fn hide_suggestions(&mut self) {
        self.suggestions = None;
    }
}
