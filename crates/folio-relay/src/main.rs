//! folio-relay: WebSocket broadcast relay for Folio group chat.
//!
//! Accepts WebSocket connections at `/ws`, registers each client, and
//! forwards every well-formed message to all other connected clients. The
//! relay never inspects message payloads beyond a structural parse and holds
//! no on-disk state — a restart drops all connections.

use clap::Parser;
use tokio::net::TcpListener;

use folio_relay::registry::Registry;
use folio_relay::server;

/// Port fallback chain: `PORT` env var, then 4000.
fn default_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(4000)
}

#[derive(Parser)]
#[command(name = "folio-relay", about = "WebSocket broadcast relay for Folio group chat")]
struct Args {
    /// Port to listen on.
    #[arg(short, long, default_value_t = default_port())]
    port: u16,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_relay=info".into()),
        )
        .init();

    let args = Args::parse();
    let registry = Registry::new();

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind TCP listener");

    tracing::info!("folio-relay listening on {}{}", addr, server::WS_PATH);

    server::run(listener, registry).await;
}
