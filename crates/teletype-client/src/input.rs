//! Line input.
//!
//! The line editor runs on its own thread: a blocking terminal read cannot
//! be cancelled, so the process never waits for it on shutdown. Each line is
//! reported as an input change (drives the suggestion overlay) followed by a
//! submit. `/quit`, end of input and Ctrl+C at the prompt stop the reader
//! after the editor has restored the terminal.

use std::thread;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::{mpsc, oneshot};

use teletype_core::error::{Result, TeletypeError};
use teletype_core::protocol::{parse_command, SlashCommand};

use crate::channel::{ClientEvent, InputEvent};
use crate::render::EditorOutput;

pub const PROMPT: &str = "> ";

/// Handle to the input thread until it is attached to a client.
pub struct LineReader {
    attach: oneshot::Sender<mpsc::UnboundedSender<ClientEvent>>,
}

impl LineReader {
    /// Starts the editor thread. Also returns the editor's output when
    /// stdin and stdout are a terminal, so display lines print above the
    /// prompt instead of through it.
    pub async fn start() -> Result<(Self, Option<EditorOutput>)> {
        let (ready_tx, ready_rx) = oneshot::channel();
        let (attach, attach_rx) = oneshot::channel();

        thread::Builder::new()
            .name("teletype-input".into())
            .spawn(move || {
                let mut editor = match DefaultEditor::new() {
                    Ok(editor) => editor,
                    Err(e) => {
                        let _ = ready_tx.send(Err(TeletypeError::Internal(format!(
                            "line editor: {e}"
                        ))));
                        return;
                    }
                };
                let output = match editor.create_external_printer() {
                    Ok(printer) => Some(EditorOutput::new(printer)),
                    Err(e) => {
                        tracing::debug!(error = %e, "no terminal; printing to stdout");
                        None
                    }
                };
                if ready_tx.send(Ok(output)).is_err() {
                    return;
                }
                if let Ok(events) = attach_rx.blocking_recv() {
                    read_lines(&mut editor, &events);
                }
            })
            .map_err(|e| TeletypeError::Internal(format!("input thread: {e}")))?;

        let output = ready_rx
            .await
            .map_err(|_| TeletypeError::Internal("input thread exited".into()))??;
        Ok((Self { attach }, output))
    }

    /// Begin feeding lines to the client behind `events`.
    pub fn attach(self, events: mpsc::UnboundedSender<ClientEvent>) {
        if self.attach.send(events).is_err() {
            tracing::warn!("input thread gone before attach");
        }
    }
}

fn read_lines(editor: &mut DefaultEditor, events: &mpsc::UnboundedSender<ClientEvent>) {
    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                if !forward_line(events, line) {
                    break;
                }
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => {
                let _ = events.send(ClientEvent::Input(InputEvent::Eof));
                break;
            }
            Err(e) => {
                tracing::warn!(error = %e, "input read failed");
                let _ = events.send(ClientEvent::Input(InputEvent::Eof));
                break;
            }
        }
    }
}

/// Reports one line as a change then a submit. Returns false when the
/// reader should stop: the client is gone or the line was `/quit`.
pub fn forward_line(events: &mpsc::UnboundedSender<ClientEvent>, line: String) -> bool {
    let quit = parse_command(&line) == Some(SlashCommand::Quit);
    let changed = ClientEvent::Input(InputEvent::Changed(line.clone()));
    let submit = ClientEvent::Input(InputEvent::Submit(line));
    if events.send(changed).is_err() || events.send(submit).is_err() {
        return false;
    }
    !quit
}
