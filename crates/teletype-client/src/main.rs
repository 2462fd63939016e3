//! TeleType terminal client.
//!
//! - Page location: `--page <url>` (none means a local page)
//! - Identity: page query `room`/`user`, then `--room`/`--user`
//! - Reconnects forever with a constant delay until `/quit`, EOF or Ctrl+C
//! - Input runs through a line editor; chat output prints above its prompt

use std::io::{self, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use teletype_client::input::LineReader;
use teletype_client::render::TerminalSurface;
use teletype_client::{config, transport::WsTransport, ChannelClient, PageLocation, SessionIdentity};
use teletype_core::Result;

#[derive(Parser, Debug)]
#[command(name = "teletype", about = "TeleType chat client")]
struct Args {
    /// Page location the client acts as if loaded from (e.g. https://host/?room=lobby).
    #[arg(long)]
    page: Option<String>,

    /// Username, overrides the page's `user` parameter.
    #[arg(long)]
    user: Option<String>,

    /// Room, overrides the page's `room` parameter.
    #[arg(long)]
    room: Option<String>,

    /// Config file (defaults to ./teletype.yaml when present).
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    // wss:// needs a process-wide rustls provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    let args = Args::parse();
    let cfg = config::load(args.config.as_deref())?;
    let page = PageLocation::parse(args.page.as_deref())?;

    let mut session = SessionIdentity::from_page(&page, &cfg.client);
    session.apply_overrides(args.user, args.room);
    tracing::info!(user = session.username(), room = session.room(), "starting");

    let (reader, editor_out) = LineReader::start().await?;
    let out: Box<dyn Write + Send> = match editor_out {
        Some(editor_out) => Box::new(editor_out),
        None => Box::new(io::stdout()),
    };

    let (client, rx) = ChannelClient::new(
        cfg.client,
        page,
        session,
        WsTransport::new(),
        TerminalSurface::new(out, true),
    );
    reader.attach(client.events());

    tokio::select! {
        _ = client.run(rx) => {}
        _ = shutdown_signal() => {}
    }
    // the input thread may still sit in a blocking read; returning ends the
    // process without joining it
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("signal received, shutting down");
}
