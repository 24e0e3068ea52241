//! Per-connection handler: register, pump frames both ways, unregister.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use crate::dispatch::dispatch;
use crate::registry::Registry;

/// Drive a single upgraded WebSocket connection until it closes.
///
/// The connection is registered for the whole time it is open and removed on
/// any exit path, so a departed client is never a forward target. Transport
/// errors close only this connection.
pub async fn handle_connection(
    ws: tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>,
    addr: SocketAddr,
    registry: Registry,
) {
    let (mut sink, mut stream) = ws.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let id = registry.register(tx).await;

    let clients = registry.count().await;
    tracing::info!(
        peer = %addr,
        connection = %id,
        clients,
        "Client connected"
    );

    loop {
        tokio::select! {
            // Broadcasts from other connections → this client's WebSocket.
            Some(msg) = rx.recv() => {
                if sink.send(Message::Text(msg.into())).await.is_err() {
                    break;
                }
            }

            // Frames from this client's WebSocket → the dispatcher.
            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        dispatch(&registry, id, &text).await;
                    }
                    Some(Ok(Message::Binary(_))) => {
                        tracing::warn!(connection = %id, "Dropping binary frame");
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(peer = %addr, connection = %id, error = %e, "WS error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }

    registry.unregister(id).await;

    let clients = registry.count().await;
    tracing::info!(
        peer = %addr,
        connection = %id,
        clients,
        "Client disconnected"
    );
}
