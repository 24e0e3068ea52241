//! Accept loop and WebSocket upgrade for the relay's HTTP+socket server.

use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::StatusCode;

use crate::connection::handle_connection;
use crate::registry::Registry;

/// Fixed path clients must upgrade on.
pub const WS_PATH: &str = "/ws";

/// Run the relay on an already-bound listener. Loops forever; individual
/// accept or handshake failures are logged and never take the process down.
pub async fn run(listener: TcpListener, registry: Registry) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let registry = registry.clone();
                tokio::spawn(async move {
                    match tokio_tungstenite::accept_hdr_async(stream, require_ws_path).await {
                        Ok(ws) => handle_connection(ws, addr, registry).await,
                        Err(e) => {
                            tracing::warn!(peer = %addr, error = %e, "WS handshake failed");
                        }
                    }
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "TCP accept error");
            }
        }
    }
}

/// Upgrade callback: reject anything that is not an upgrade on [`WS_PATH`].
fn require_ws_path(request: &Request, response: Response) -> Result<Response, ErrorResponse> {
    if request.uri().path() == WS_PATH {
        Ok(response)
    } else {
        tracing::warn!(path = %request.uri().path(), "Rejecting upgrade on unknown path");
        let mut rejection = ErrorResponse::new(Some("Not Found".into()));
        *rejection.status_mut() = StatusCode::NOT_FOUND;
        Err(rejection)
    }
}
