//! The production WebSocket link against a loopback server.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;

use teletype_client::config::ClientSection;
use teletype_client::render::Transcript;
use teletype_client::transport::{LinkEvent, WsTransport};
use teletype_client::{ChannelClient, ClientEvent, LinkState, PageLocation, SessionIdentity};
use teletype_core::protocol::Envelope;

type Client = ChannelClient<WsTransport, Transcript>;

fn client_for(port: u16) -> (Client, mpsc::UnboundedReceiver<ClientEvent>) {
    let cfg = ClientSection::default();
    let raw = format!("http://127.0.0.1:{port}/?room=lobby&user=Ann");
    let page = PageLocation::parse(Some(&raw)).unwrap();
    let session = SessionIdentity::from_page(&page, &cfg);
    ChannelClient::new(cfg, page, session, WsTransport::new(), Transcript::new())
}

/// Next link event, handed to the client as well so its state follows.
async fn next_link_event(
    client: &mut Client,
    rx: &mut mpsc::UnboundedReceiver<ClientEvent>,
) -> LinkEvent {
    let ev = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no link event within 5s")
        .expect("event queue closed");
    let ClientEvent::Link { event, .. } = ev.clone() else {
        panic!("unexpected event {ev:?}");
    };
    client.handle(ev);
    event
}

#[tokio::test]
async fn refused_handshake_reports_error_then_closed() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let (mut client, mut rx) = client_for(port);
    client.connect();

    assert!(matches!(
        next_link_event(&mut client, &mut rx).await,
        LinkEvent::Error(_)
    ));
    assert_eq!(next_link_event(&mut client, &mut rx).await, LinkEvent::Closed);
    assert_eq!(client.state(), LinkState::Closed);
    assert!(client.reconnect_pending());
    client.shutdown();
}

#[tokio::test]
async fn join_goes_out_as_text_and_echo_comes_back() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (seen_tx, seen_rx) = oneshot::channel();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        let first = ws.next().await.unwrap().unwrap();
        let _ = seen_tx.send(first.clone());
        ws.send(first).await.unwrap();
        ws.close(None).await.unwrap();
        while let Some(Ok(_)) = ws.next().await {}
    });

    let (mut client, mut rx) = client_for(port);
    client.connect();

    assert_eq!(next_link_event(&mut client, &mut rx).await, LinkEvent::Opened);
    assert!(client.is_open());

    let Message::Text(sent) = seen_rx.await.unwrap() else {
        panic!("outbound frame was not text");
    };
    let expected = Envelope::join("Ann", "lobby");
    assert_eq!(Envelope::decode(sent.as_str()).unwrap(), expected);

    let LinkEvent::Frame(echo) = next_link_event(&mut client, &mut rx).await else {
        panic!("expected the echoed frame");
    };
    assert_eq!(Envelope::decode(&echo).unwrap(), expected);
    assert!(client.surface().contains("lobby"));

    assert_eq!(next_link_event(&mut client, &mut rx).await, LinkEvent::Closed);
    assert_eq!(client.state(), LinkState::Closed);
    assert!(client.surface().contains("Signal lost. Retrying uplink..."));

    client.shutdown();
    server.await.unwrap();
}
