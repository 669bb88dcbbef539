//! In-memory delivery transport.

use std::collections::{HashMap, HashSet};

use ferry_types::DestinationId;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::TransportError;
use crate::message::AssetEnvelope;
use crate::DeliveryTransport;

/// In-memory transport that records every delivered envelope.
///
/// Supports failure injection: destinations marked down reject
/// deliveries, which is how tests exercise the dispatcher's error path.
#[derive(Default)]
pub struct MemoryTransport {
    delivered: RwLock<HashMap<DestinationId, Vec<AssetEnvelope>>>,
    down: RwLock<HashSet<DestinationId>>,
}

impl MemoryTransport {
    /// Create an empty transport with every destination reachable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a destination unreachable.
    pub async fn mark_down(&self, destination: DestinationId) {
        self.down.write().await.insert(destination);
    }

    /// Mark a destination reachable again.
    pub async fn mark_up(&self, destination: &DestinationId) {
        self.down.write().await.remove(destination);
    }

    /// Envelopes delivered to one destination, in delivery order.
    pub async fn delivered(&self, destination: &DestinationId) -> Vec<AssetEnvelope> {
        self.delivered
            .read()
            .await
            .get(destination)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of envelopes delivered to one destination.
    pub async fn delivered_count(&self, destination: &DestinationId) -> usize {
        self.delivered
            .read()
            .await
            .get(destination)
            .map_or(0, Vec::len)
    }

    /// Total envelopes delivered across all destinations.
    pub async fn total_delivered(&self) -> usize {
        self.delivered.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait::async_trait]
impl DeliveryTransport for MemoryTransport {
    async fn enqueue(
        &self,
        destination: &DestinationId,
        envelope: &AssetEnvelope,
    ) -> Result<(), TransportError> {
        if self.down.read().await.contains(destination) {
            return Err(TransportError::Unreachable {
                destination: destination.clone(),
                reason: "destination marked down".to_string(),
            });
        }

        debug!(%destination, payload_bytes = envelope.payload.len(), "recorded delivery");
        self.delivered
            .write()
            .await
            .entry(destination.clone())
            .or_default()
            .push(envelope.clone());
        Ok(())
    }
}
