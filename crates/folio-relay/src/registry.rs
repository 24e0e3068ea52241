//! Connection registry: the process-wide set of currently open connections.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};

/// Process-unique identifier for one live connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sender half of a connection's outbound channel. Unbounded so the
/// dispatcher never blocks on a slow peer while holding a snapshot.
pub type ConnectionTx = mpsc::UnboundedSender<String>;

/// Thread-safe registry of open connections. Cloneable handle; all clones
/// share the same underlying set.
#[derive(Clone)]
pub struct Registry {
    connections: Arc<RwLock<HashMap<ConnectionId, ConnectionTx>>>,
    next_id: Arc<AtomicU64>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Add a newly opened connection's sender. Always succeeds.
    pub async fn register(&self, tx: ConnectionTx) -> ConnectionId {
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.connections.write().await.insert(id, tx);
        id
    }

    /// Remove a connection. No-op if it was already removed (a close event
    /// may fire after an error event for the same connection).
    pub async fn unregister(&self, id: ConnectionId) {
        self.connections.write().await.remove(&id);
    }

    /// Point-in-time snapshot of every registered connection other than
    /// `excluding`. No ordering guarantee.
    pub async fn peers_excluding(&self, excluding: ConnectionId) -> Vec<(ConnectionId, ConnectionTx)> {
        self.connections
            .read()
            .await
            .iter()
            .filter(|(id, _)| **id != excluding)
            .map(|(id, tx)| (*id, tx.clone()))
            .collect()
    }

    /// Number of currently open connections.
    pub async fn count(&self) -> usize {
        self.connections.read().await.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> (ConnectionTx, mpsc::UnboundedReceiver<String>) {
        mpsc::unbounded_channel()
    }

    #[tokio::test]
    async fn register_assigns_distinct_ids() {
        let registry = Registry::new();
        let (tx1, _rx1) = channel();
        let (tx2, _rx2) = channel();
        let a = registry.register(tx1).await;
        let b = registry.register(tx2).await;
        assert_ne!(a, b);
        assert_eq!(registry.count().await, 2);
    }

    #[tokio::test]
    async fn unregister_removes_only_the_given_connection() {
        let registry = Registry::new();
        let (tx1, _rx1) = channel();
        let (tx2, _rx2) = channel();
        let a = registry.register(tx1).await;
        let _b = registry.register(tx2).await;
        registry.unregister(a).await;
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn unregister_twice_is_a_noop() {
        let registry = Registry::new();
        let (tx1, _rx1) = channel();
        let (tx2, _rx2) = channel();
        let a = registry.register(tx1).await;
        let _b = registry.register(tx2).await;
        registry.unregister(a).await;
        registry.unregister(a).await;
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn peers_excluding_skips_the_sender() {
        let registry = Registry::new();
        let (tx1, _rx1) = channel();
        let (tx2, _rx2) = channel();
        let (tx3, _rx3) = channel();
        let a = registry.register(tx1).await;
        let b = registry.register(tx2).await;
        let c = registry.register(tx3).await;

        let peers = registry.peers_excluding(a).await;
        let ids: Vec<ConnectionId> = peers.iter().map(|(id, _)| *id).collect();
        assert_eq!(peers.len(), 2);
        assert!(ids.contains(&b));
        assert!(ids.contains(&c));
        assert!(!ids.contains(&a));
    }

    #[tokio::test]
    async fn peers_excluding_on_singleton_registry_is_empty() {
        let registry = Registry::new();
        let (tx, _rx) = channel();
        let a = registry.register(tx).await;
        assert!(registry.peers_excluding(a).await.is_empty());
    }
}
