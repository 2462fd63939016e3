use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use teletype_core::protocol::{command, parse_command, Envelope, SlashCommand};

use crate::config::ClientSection;
use crate::endpoint::PageLocation;
use crate::render::{Line, Surface};
use crate::session::SessionIdentity;
use crate::transport::{Connection, LinkEvent, LinkSink, Transport};

use super::event::{ClientEvent, Flow, InputEvent};

pub(crate) const BOOT_NOTICE: &str = "Booting up TeleType client...";
pub(crate) const OPEN_NOTICE: &str = "Connected to mainframe.";
pub(crate) const ERROR_NOTICE: &str = "Connection Error. Ensure server is running.";
pub(crate) const LOST_NOTICE: &str = "Signal lost. Retrying uplink...";

/// Connection lifecycle as seen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Idle,
    Connecting,
    Open,
    Closed,
}

/// Result of submitting an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submit {
    /// Nothing happened; the input stays as typed.
    Ignored,
    /// Handled; the input is cleared.
    Cleared,
    /// The user asked to leave.
    Quit,
}

struct PendingReconnect {
    timer_id: u64,
    task: JoinHandle<()>,
}

/// Owns the session identity and the single live connection, and mediates
/// between input events and envelope traffic.
pub struct ChannelClient<T: Transport, S: Surface> {
    cfg: ClientSection,
    page: PageLocation,
    session: SessionIdentity,
    transport: T,
    surface: S,
    events: mpsc::UnboundedSender<ClientEvent>,
    conn: Option<Connection>,
    state: LinkState,
    next_conn_id: u64,
    reconnect: Option<PendingReconnect>,
    next_timer_id: u64,
}

impl<T: Transport, S: Surface> ChannelClient<T, S> {
    /// Build a client and the receiving end of its event queue.
    pub fn new(
        cfg: ClientSection,
        page: PageLocation,
        session: SessionIdentity,
        transport: T,
        surface: S,
    ) -> (Self, mpsc::UnboundedReceiver<ClientEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let client = Self {
            cfg,
            page,
            session,
            transport,
            surface,
            events,
            conn: None,
            state: LinkState::Idle,
            next_conn_id: 0,
            reconnect: None,
            next_timer_id: 0,
        };
        (client, rx)
    }

    /// Sender for feeding input events from outside the loop.
    pub fn events(&self) -> mpsc::UnboundedSender<ClientEvent> {
        self.events.clone()
    }

    pub fn session(&self) -> &SessionIdentity {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == LinkState::Open && self.conn.is_some()
    }

    pub fn reconnect_pending(&self) -> bool {
        self.reconnect.is_some()
    }

    /// Boot notice, first connect, then handle events until quit.
    pub async fn run(mut self, mut rx: mpsc::UnboundedReceiver<ClientEvent>) {
        self.notice(BOOT_NOTICE);
        self.connect();
        while let Some(ev) = rx.recv().await {
            if self.handle(ev) == Flow::Quit {
                break;
            }
        }
        self.shutdown();
    }

    /// Open a fresh connection, replacing the current one. Cancels any
    /// pending reconnect so at most one timer exists.
    pub fn connect(&mut self) {
        self.cancel_reconnect();

        let endpoint = match self.page.endpoint(&self.cfg) {
            Ok(ep) => ep,
            Err(e) => {
                tracing::error!(error = %e, "cannot derive endpoint");
                self.surface.append(Line::error(ERROR_NOTICE));
                self.lost();
                return;
            }
        };
        if endpoint.local_fallback {
            self.notice(format!(
                "Running local file. Attempting {}...",
                endpoint.host_port()
            ));
        }

        self.next_conn_id += 1;
        let sink = LinkSink::new(self.next_conn_id, self.events.clone());
        tracing::debug!(conn_id = self.next_conn_id, endpoint = %endpoint.url, "connecting");
        // replacing the handle tears down the previous link
        self.conn = Some(self.transport.open(&endpoint.url, sink));
        self.state = LinkState::Connecting;
    }

    /// Drop the connection and any pending timer.
    pub fn shutdown(&mut self) {
        self.cancel_reconnect();
        self.conn = None;
        self.state = LinkState::Closed;
    }

    pub fn handle(&mut self, ev: ClientEvent) -> Flow {
        match ev {
            ClientEvent::Link { conn_id, event } => {
                self.on_link(conn_id, event);
                Flow::Continue
            }
            ClientEvent::ReconnectDue { timer_id } => {
                let due = self
                    .reconnect
                    .as_ref()
                    .is_some_and(|p| p.timer_id == timer_id);
                if due {
                    self.reconnect = None;
                    self.connect();
                } else {
                    tracing::trace!(timer_id, "stale reconnect timer");
                }
                Flow::Continue
            }
            ClientEvent::Input(InputEvent::Changed(text)) => {
                self.input_changed(&text);
                Flow::Continue
            }
            ClientEvent::Input(InputEvent::Submit(text)) => match self.submit(&text) {
                Submit::Quit => Flow::Quit,
                _ => Flow::Continue,
            },
            ClientEvent::Input(InputEvent::Eof) => Flow::Quit,
        }
    }

    fn on_link(&mut self, conn_id: u64, event: LinkEvent) {
        if self.conn.as_ref().map(Connection::id) != Some(conn_id) {
            tracing::trace!(conn_id, ?event, "event from replaced link");
            return;
        }

        match event {
            LinkEvent::Opened => {
                self.state = LinkState::Open;
                self.notice(OPEN_NOTICE);
                let join = Envelope::join(self.session.username(), self.session.room());
                self.send(&join);
            }
            LinkEvent::Error(e) => {
                tracing::warn!(conn_id, error = %e, "connection error");
                self.surface.append(Line::error(ERROR_NOTICE));
            }
            LinkEvent::Closed => {
                self.conn = None;
                self.lost();
            }
            LinkEvent::Frame(text) => self.receive(&text),
        }
    }

    fn lost(&mut self) {
        self.state = LinkState::Closed;
        self.surface.append(Line::error(LOST_NOTICE));
        self.schedule_reconnect();
    }

    fn schedule_reconnect(&mut self) {
        self.cancel_reconnect();
        self.next_timer_id += 1;
        let timer_id = self.next_timer_id;
        let delay = self.cfg.reconnect_delay();
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(ClientEvent::ReconnectDue { timer_id });
        });
        tracing::debug!(timer_id, delay_ms = delay.as_millis() as u64, "reconnect scheduled");
        self.reconnect = Some(PendingReconnect { timer_id, task });
    }

    fn cancel_reconnect(&mut self) {
        if let Some(pending) = self.reconnect.take() {
            pending.task.abort();
        }
    }

    /// Receive path: undecodable frames go to the log only.
    fn receive(&mut self, text: &str) {
        match Envelope::decode(text) {
            Ok(env) => self.surface.append(Line::from_envelope(env, Utc::now())),
            Err(e) => tracing::warn!(error = %e, "dropping inbound frame"),
        }
    }

    /// Sends only while open; anything else is dropped without notice.
    fn send(&mut self, env: &Envelope) -> bool {
        let conn = match (&self.conn, self.state) {
            (Some(conn), LinkState::Open) => conn,
            _ => {
                tracing::debug!(msg_type = env.msg_type.as_str(), "not connected; dropping");
                return false;
            }
        };
        let frame = match env.encode() {
            Ok(f) => f,
            Err(e) => {
                tracing::error!(error = %e, "encode failed");
                return false;
            }
        };
        match conn.send(frame) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "send failed");
                false
            }
        }
    }

    /// Send path for one submitted line.
    pub fn submit(&mut self, input: &str) -> Submit {
        let text = input.trim();
        if text.is_empty() {
            return Submit::Ignored;
        }

        if let Some(cmd) = parse_command(text) {
            return self.run_command(cmd);
        }

        if !self.is_open() {
            tracing::debug!("not connected; chat line dropped");
            return Submit::Ignored;
        }
        let chat = Envelope::chat(self.session.username(), self.session.room(), text);
        self.send(&chat);
        self.surface.hide_suggestions();
        Submit::Cleared
    }

    fn run_command(&mut self, cmd: SlashCommand) -> Submit {
        match cmd {
            SlashCommand::Join(room) => {
                self.notice(format!("Switching to room: {room}"));
                tracing::info!(room = %room, "switching room");
                self.session.set_room(room);
                let join = Envelope::join(self.session.username(), self.session.room());
                self.send(&join);
                Submit::Cleared
            }
            SlashCommand::SetName(name) => {
                tracing::info!(user = %name, "changing name");
                self.session.set_username(name);
                let rename = Envelope::name(self.session.username(), self.session.room());
                self.send(&rename);
                Submit::Cleared
            }
            SlashCommand::Help => {
                for line in command::help_lines() {
                    self.notice(line);
                }
                Submit::Cleared
            }
            SlashCommand::Quit => Submit::Quit,
            SlashCommand::Invalid(reason) => {
                tracing::debug!(%reason, "ignoring command");
                Submit::Ignored
            }
        }
    }

    /// Suggestion overlay: filter on `/` input, hide otherwise. With no
    /// matches the overlay keeps what it showed.
    pub fn input_changed(&mut self, input: &str) {
        match command::suggestions(input) {
            None => self.surface.hide_suggestions(),
            Some(matches) if matches.is_empty() => {}
            Some(matches) => self.surface.show_suggestions(&matches),
        }
    }

    fn notice(&mut self, text: impl Into<String>) {
        self.surface.append(Line::notice(text));
    }
}
