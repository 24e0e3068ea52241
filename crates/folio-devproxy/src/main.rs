//! folio-devproxy: development reverse proxy in front of the bundler.
//!
//! Listens on one port and tunnels every accepted connection to the bundler
//! dev process, byte for byte. Because the tunnel operates below HTTP, plain
//! request/response and upgraded WebSocket traffic pass through unchanged.

use clap::Parser;
use tokio::net::{TcpListener, TcpStream};

#[derive(Parser)]
#[command(name = "folio-devproxy", about = "Dev reverse proxy for the Folio bundler")]
struct Args {
    /// Port to listen on.
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// Bundler address to forward to.
    #[arg(long, default_value = "127.0.0.1:8081")]
    upstream: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_devproxy=info".into()),
        )
        .init();

    let args = Args::parse();

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind TCP listener");

    tracing::info!("folio-devproxy listening on {} -> {}", addr, args.upstream);

    loop {
        match listener.accept().await {
            Ok((inbound, peer)) => {
                let upstream = args.upstream.clone();
                tokio::spawn(async move {
                    if let Err(e) = forward(inbound, &upstream).await {
                        tracing::debug!(peer = %peer, error = %e, "Proxy connection ended");
                    }
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "TCP accept error");
            }
        }
    }
}

/// Tunnel one client connection to the upstream until either side closes.
async fn forward(mut inbound: TcpStream, upstream: &str) -> std::io::Result<()> {
    let mut outbound = TcpStream::connect(upstream).await?;
    let _ = tokio::io::copy_bidirectional(&mut inbound, &mut outbound).await?;
    Ok(())
}
