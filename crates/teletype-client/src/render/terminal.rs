use std::borrow::Cow;
use std::io::{self, Write};

use rustyline::ExternalPrinter;
use teletype_core::protocol::{CommandInfo, MessageType};

use super::{Line, LineBody, Surface};

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_DIM: &str = "\x1b[2m";
const ANSI_RED: &str = "\x1b[31m";
const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_BLUE: &str = "\x1b[34m";

/// ANSI terminal display. Each entry is written as one block; the prompt
/// belongs to the line editor.
pub struct TerminalSurface<W: Write + Send> {
    out: W,
    color: bool,
    overlay: Option<Vec<CommandInfo>>,
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            overlay: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, code: &'static str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    fn format_line(&self, line: &Line) -> String {
        let ts = line.timestamp();
        match &line.body {
            LineBody::Notice { content } => {
                self.paint(ANSI_GREEN, &format!("[{ts}] {}", scrub(content)))
            }
            LineBody::Message {
                kind,
                sender,
                content,
            } => {
                let body_code = if *kind == MessageType::Error {
                    ANSI_RED
                } else {
                    ANSI_RESET
                };
                format!(
                    "{} {} {}",
                    self.paint(ANSI_DIM, &format!("[{ts}]")),
                    self.paint(ANSI_BLUE, &format!("{}:", scrub(sender))),
                    self.paint(body_code, &scrub(content)),
                )
            }
        }
    }

    fn write_block(&mut self, text: &str) {
        let res = writeln!(self.out, "{text}").and_then(|_| self.out.flush());
        if let Err(e) = res {
            tracing::warn!(error = %e, "terminal write failed");
        }
    }
}

/// Server text must not drive the terminal: control characters (escape
/// sequences, carriage returns, newlines) are shown escaped.
fn scrub(text: &str) -> Cow<'_, str> {
    if !text.chars().any(char::is_control) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

impl<W: Write + Send> Surface for TerminalSurface<W> {
    fn append(&mut self, line: Line) {
        let text = self.format_line(&line);
        self.write_block(&text);
    }

    fn show_suggestions(&mut self, items: &[CommandInfo]) {
        if self.overlay.as_deref() == Some(items) {
            return;
        }
        let text = items
            .iter()
            .map(|c| self.paint(ANSI_DIM, &format!("  {:<10} {}", c.cmd, c.desc)))
            .collect::<Vec<_>>()
            .join("\n");
        self.overlay = Some(items.to_vec());
        self.write_block(&text);
    }

    fn hide_suggestions(&mut self) {
        // printed suggestions scroll away with the next line
        self.overlay = None;
    }
}

/// `Write` adapter that hands each flushed block to the line editor, which
/// prints it above the line being edited.
pub struct EditorOutput {
    printer: Box<dyn ExternalPrinter + Send>,
    buf: Vec<u8>,
}

impl EditorOutput {
    pub fn new(printer: impl ExternalPrinter + Send + 'static) -> Self {
        Self {
            printer: Box::new(printer),
            buf: Vec::new(),
        }
    }
}

impl Write for EditorOutput {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let block = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        self.printer
            .print(block)
            .map_err(|e| io::Error::other(e.to_string()))
    }
}
