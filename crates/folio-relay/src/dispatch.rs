//! Broadcast dispatcher: forward each inbound message to every other open
//! connection, skipping the sender.

use crate::protocol::Envelope;
use crate::registry::{ConnectionId, Registry};

/// Handle one inbound text frame from `sender`.
///
/// The frame must parse as an [`Envelope`]; anything else is logged and
/// discarded without disturbing the sender's connection. Valid frames are
/// forwarded verbatim to every other registered connection. Delivery is
/// fire-and-forget: a peer whose channel has already closed is skipped
/// silently, and its own close path removes it from the registry.
pub async fn dispatch(registry: &Registry, sender: ConnectionId, raw: &str) {
    if let Err(e) = serde_json::from_str::<Envelope>(raw) {
        tracing::warn!(connection = %sender, error = %e, "Dropping malformed message");
        return;
    }

    let peers = registry.peers_excluding(sender).await;
    for (peer, tx) in peers {
        if tx.send(raw.to_owned()).is_err() {
            // Peer closed between snapshot and send.
            tracing::debug!(connection = %peer, "Skipping closed peer");
        }
    }
}
