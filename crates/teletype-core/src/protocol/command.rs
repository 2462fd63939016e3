//! Slash command grammar.
//!
//! Input starting with `/` is never sent as chat. It is tokenized on
//! whitespace and the first token (case-insensitive) selects the command.
//! Commands that need an argument and lack one parse as `Invalid`, which
//! callers treat as a silent no-op.

/// Prefix that marks a command line.
pub const COMMAND_PREFIX: char = '/';

/// One entry of the static command catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    pub cmd: &'static str,
    pub desc: &'static str,
}

/// Commands offered as suggestions and listed by `/help`.
pub const KNOWN_COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        cmd: "/join",
        desc: "Join a room (Usage: /join <room>)",
    },
    CommandInfo {
        cmd: "/setname",
        desc: "Set your name (Usage: /setname <name>)",
    },
    CommandInfo {
        cmd: "/nick",
        desc: "Alias for /setname",
    },
    CommandInfo {
        cmd: "/help",
        desc: "Show this help menu",
    },
];

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// Switch to another room.
    Join(String),
    /// Change the display name (`/setname` or `/nick`).
    SetName(String),
    /// List the known commands locally.
    Help,
    /// Leave the client.
    Quit,
    /// Unknown command or missing argument.
    Invalid(String),
}

/// Parses a trimmed input line.
///
/// Returns `None` when the line is not a command and should be treated as
/// chat text.
pub fn parse_command(input: &str) -> Option<SlashCommand> {
    let input = input.trim();
    if !input.starts_with(COMMAND_PREFIX) {
        return None;
    }

    // the prefix stays on the first token, so "/ join" selects nothing
    let mut parts = input.split_whitespace();
    let command = parts.next().unwrap_or_default().to_lowercase();
    let argument = parts.next();

    let result = match (command.as_str(), argument) {
        ("/join", Some(room)) => SlashCommand::Join(room.to_string()),
        ("/join", None) => SlashCommand::Invalid("/join requires a room".to_string()),
        ("/nick" | "/setname", Some(name)) => SlashCommand::SetName(name.to_string()),
        ("/nick" | "/setname", None) => SlashCommand::Invalid(format!("{command} requires a name")),
        ("/help", _) => SlashCommand::Help,
        ("/quit", _) => SlashCommand::Quit,
        (other, _) => SlashCommand::Invalid(format!("unknown command: {other}")),
    };
    Some(result)
}

/// Filters the catalog for the suggestion overlay.
///
/// Returns `None` when the input is not a command (overlay hidden). A bare
/// `/` matches every command; otherwise entries match by lowercase prefix.
pub fn suggestions(input: &str) -> Option<Vec<CommandInfo>> {
    if !input.starts_with(COMMAND_PREFIX) {
        return None;
    }
    let search = input.to_lowercase();
    Some(
        KNOWN_COMMANDS
            .iter()
            .filter(|c| search == "/" || c.cmd.starts_with(&search))
            .copied()
            .collect(),
    )
}

/// Help lines rendered by `/help`.
pub fn help_lines() -> Vec<String> {
    KNOWN_COMMANDS
        .iter()
        .map(|c| format!("{} - {}", c.cmd, c.desc))
        .collect()
}
